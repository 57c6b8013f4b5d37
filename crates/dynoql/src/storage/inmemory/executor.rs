//! In-memory statement executor.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dynoql_core::relay::{ExecuteError, ExecuteStatementInput, StatementExecutor, StatementPage};

const TOKEN_PREFIX: &str = "page-";

/// Serves a fixed sequence of pages for every statement.
///
/// Page `i` is returned for token `page-{i}` (page 0 when no token is sent)
/// and carries `page-{i + 1}` when a later page exists. A failure can be
/// scripted for a given call, counted from zero across the executor's
/// lifetime. Data is not persisted and will be lost when the executor is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutor {
    pages: Arc<Vec<StatementPage>>,
    failure: Option<(usize, ExecuteError)>,
    requests: Arc<Mutex<Vec<ExecuteStatementInput>>>,
}

impl InMemoryExecutor {
    /// Creates an executor serving `pages` in order. Any `next_token` already
    /// set on the pages is replaced.
    pub fn new(pages: Vec<StatementPage>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, mut page)| {
                page.next_token = (index + 1 < count).then(|| token_for(index + 1));
                page
            })
            .collect();

        Self {
            pages: Arc::new(pages),
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails the `call`-th request (0-based) with `error`.
    #[cfg(test)]
    pub fn failing_at(mut self, call: usize, error: ExecuteError) -> Self {
        self.failure = Some((call, error));
        self
    }

    /// Every request received so far, in order.
    #[cfg(test)]
    pub fn requests(&self) -> Vec<ExecuteStatementInput> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn page_index(&self, token: Option<&str>) -> Result<usize, ExecuteError> {
        let Some(token) = token else {
            return Ok(0);
        };

        token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|index| index.parse::<usize>().ok())
            .filter(|index| *index > 0 && *index < self.pages.len())
            .ok_or_else(|| {
                ExecuteError::service("ValidationException", format!("Invalid NextToken: {token}"))
            })
    }
}

fn token_for(index: usize) -> String {
    format!("{TOKEN_PREFIX}{index}")
}

#[async_trait]
impl StatementExecutor for InMemoryExecutor {
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<StatementPage, ExecuteError> {
        let call = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|e| ExecuteError::uncoded(format!("request log poisoned: {e}")))?;
            requests.push(input.clone());
            requests.len() - 1
        };

        if let Some((failing_call, error)) = &self.failure {
            if *failing_call == call {
                return Err(error.clone());
            }
        }

        let index = self.page_index(input.next_token.as_deref())?;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}
