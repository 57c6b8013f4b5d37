use async_trait::async_trait;

use super::classify::ClassifiedError;
use super::error::ExecuteError;
use super::types::{ExecuteStatementInput, PageBound, QueryOutcome, StatementPage};

/// Runs one `ExecuteStatement` call against the backing database.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Executes a statement, resuming from `input.next_token` when present.
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<StatementPage, ExecuteError>;
}

/// Receives progress reports from the relay.
///
/// Injected into [`super::QueryRelay`] so the relay itself holds no logging
/// state.
pub trait QueryLog: Send + Sync {
    /// A statement was accepted for execution.
    fn query_received(&self, statement: &str, bound: PageBound);

    /// A page came back. `page` is 1-based.
    fn page_fetched(&self, page: u32, items: usize, has_more: bool);

    /// The loop finished and the records are about to be returned.
    fn query_completed(&self, outcome: &QueryOutcome);

    /// A call failed; everything fetched so far is dropped.
    fn query_failed(&self, error: &ClassifiedError, pages_completed: u32);
}

/// A [`QueryLog`] that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopQueryLog;

impl QueryLog for NoopQueryLog {
    fn query_received(&self, _statement: &str, _bound: PageBound) {}

    fn page_fetched(&self, _page: u32, _items: usize, _has_more: bool) {}

    fn query_completed(&self, _outcome: &QueryOutcome) {}

    fn query_failed(&self, _error: &ClassifiedError, _pages_completed: u32) {}
}
