use std::sync::Arc;

use crate::attribute::decode_item;

use super::classify::classify;
use super::error::{RelayError, Result};
use super::traits::{QueryLog, StatementExecutor};
use super::types::{ExecuteStatementInput, PageBound, QueryOutcome};

/// Items requested per `ExecuteStatement` call unless configured otherwise.
pub const DEFAULT_ITEM_LIMIT: i32 = 1000;

/// Drives `ExecuteStatement` across continuation tokens and decodes the items.
#[derive(Clone)]
pub struct QueryRelay {
    executor: Arc<dyn StatementExecutor>,
    log: Arc<dyn QueryLog>,
    item_limit: Option<i32>,
}

impl QueryRelay {
    pub fn new(executor: Arc<dyn StatementExecutor>, log: Arc<dyn QueryLog>) -> Self {
        Self {
            executor,
            log,
            item_limit: Some(DEFAULT_ITEM_LIMIT),
        }
    }

    /// Sets the per-call item limit. `None` lets the service pick.
    pub fn with_item_limit(mut self, limit: Option<i32>) -> Self {
        self.item_limit = limit;
        self
    }

    pub fn item_limit(&self) -> Option<i32> {
        self.item_limit
    }

    /// Executes `statement`, following continuation tokens.
    ///
    /// The first page is always fetched. After each page the loop continues
    /// only while a token is pending and no more than `bound` pages have been
    /// fetched, so at most `bound + 1` calls are made. Any failed call aborts
    /// the whole submission and discards the pages already decoded.
    pub async fn submit(&self, statement: &str, bound: PageBound) -> Result<QueryOutcome> {
        self.log.query_received(statement, bound);

        let mut outcome = QueryOutcome::default();
        let mut next_token: Option<String> = None;

        loop {
            let input = ExecuteStatementInput {
                statement: statement.to_string(),
                next_token: next_token.take(),
                limit: self.item_limit,
            };

            let page = match self.executor.execute_statement(input).await {
                Ok(page) => page,
                Err(err) => {
                    let classified = classify(&err);
                    self.log.query_failed(&classified, outcome.pages_fetched);
                    return Err(RelayError::Execute {
                        classified,
                        pages_completed: outcome.pages_fetched,
                    });
                }
            };

            outcome.records.extend(page.items.iter().map(decode_item));
            next_token = page.next_token;
            outcome.pages_fetched += 1;

            self.log
                .page_fetched(outcome.pages_fetched, page.items.len(), next_token.is_some());

            if next_token.is_none() || outcome.pages_fetched > bound.get() {
                break;
            }
        }

        outcome.truncated = next_token.is_some();
        self.log.query_completed(&outcome);

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::attribute::RawItem;
    use crate::relay::{ClassifiedError, ErrorCategory, ExecuteError, StatementPage};

    /// Replays scripted responses and records every input it receives.
    #[derive(Default)]
    struct ScriptedExecutor {
        responses: Mutex<VecDeque<std::result::Result<StatementPage, ExecuteError>>>,
        calls: Mutex<Vec<ExecuteStatementInput>>,
    }

    impl ScriptedExecutor {
        fn new(
            responses: impl IntoIterator<Item = std::result::Result<StatementPage, ExecuteError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            })
        }

        /// `count` pages of one item each, every page but the last with a token.
        fn paged(count: usize) -> Arc<Self> {
            Self::new((0..count).map(|i| {
                Ok(page(
                    vec![item(json!({"n": {"N": i.to_string()}}))],
                    (i + 1 < count).then(|| format!("token-{}", i + 1)),
                ))
            }))
        }

        fn calls(&self) -> Vec<ExecuteStatementInput> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatementExecutor for ScriptedExecutor {
        async fn execute_statement(
            &self,
            input: ExecuteStatementInput,
        ) -> std::result::Result<StatementPage, ExecuteError> {
            self.calls.lock().unwrap().push(input);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("executor called more times than scripted")
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Received(String, u32),
        Page(u32, usize, bool),
        Completed(usize, u32, bool),
        Failed(ErrorCategory, u32),
    }

    #[derive(Default)]
    struct RecordingLog {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingLog {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl QueryLog for RecordingLog {
        fn query_received(&self, statement: &str, bound: PageBound) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Received(statement.to_string(), bound.get()));
        }

        fn page_fetched(&self, page: u32, items: usize, has_more: bool) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Page(page, items, has_more));
        }

        fn query_completed(&self, outcome: &QueryOutcome) {
            self.events.lock().unwrap().push(Event::Completed(
                outcome.records.len(),
                outcome.pages_fetched,
                outcome.truncated,
            ));
        }

        fn query_failed(&self, error: &ClassifiedError, pages_completed: u32) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Failed(error.category, pages_completed));
        }
    }

    fn item(value: Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    fn page(items: Vec<RawItem>, next_token: Option<String>) -> StatementPage {
        StatementPage { items, next_token }
    }

    fn order(id: u32) -> RawItem {
        item(json!({
            "id": {"S": format!("order-{id}")},
            "customer": {"M": {"name": {"S": format!("customer-{id}")}}}
        }))
    }

    fn orders_executor() -> Arc<ScriptedExecutor> {
        ScriptedExecutor::new([
            Ok(page(
                vec![order(1), order(2), order(3)],
                Some("page-2".to_string()),
            )),
            Ok(page(vec![order(4), order(5)], None)),
        ])
    }

    fn relay(executor: Arc<ScriptedExecutor>, log: Arc<RecordingLog>) -> QueryRelay {
        QueryRelay::new(executor, log)
    }

    #[tokio::test]
    async fn test_orders_two_pages_with_default_bound() {
        let executor = orders_executor();
        let log = Arc::new(RecordingLog::default());

        let outcome = relay(executor.clone(), log.clone())
            .submit("SELECT * FROM Orders", PageBound::new(10))
            .await
            .unwrap();

        let ids: Vec<&str> = outcome
            .records
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["order-1", "order-2", "order-3", "order-4", "order-5"]
        );
        assert_eq!(outcome.records[3]["customer"], json!({"name": "customer-4"}));
        assert_eq!(outcome.pages_fetched, 2);
        assert!(!outcome.truncated);

        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].next_token, None);
        assert_eq!(calls[1].next_token.as_deref(), Some("page-2"));
        assert!(calls.iter().all(|c| c.statement == "SELECT * FROM Orders"));
        assert!(calls.iter().all(|c| c.limit == Some(DEFAULT_ITEM_LIMIT)));

        assert_eq!(
            log.events(),
            vec![
                Event::Received("SELECT * FROM Orders".to_string(), 10),
                Event::Page(1, 3, true),
                Event::Page(2, 2, false),
                Event::Completed(5, 2, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_orders_bound_zero_fetches_one_page() {
        let executor = orders_executor();
        let log = Arc::new(RecordingLog::default());

        let outcome = relay(executor.clone(), log)
            .submit("SELECT * FROM Orders", PageBound::new(0))
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.records[0]["id"], json!("order-1"));
        assert_eq!(outcome.records[2]["id"], json!("order-3"));
        assert_eq!(outcome.pages_fetched, 1);
        assert!(outcome.truncated);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_stops_after_last_page_regardless_of_bound() {
        for bound in [4, 5, 10, u32::MAX] {
            let executor = ScriptedExecutor::paged(4);
            let outcome = relay(executor.clone(), Arc::default())
                .submit("SELECT * FROM T", PageBound::new(bound))
                .await
                .unwrap();

            assert_eq!(executor.calls().len(), 4, "bound {bound}");
            assert_eq!(outcome.pages_fetched, 4);
            assert_eq!(outcome.records.len(), 4);
            assert!(!outcome.truncated);
        }
    }

    #[tokio::test]
    async fn test_bound_below_page_count_fetches_bound_plus_one() {
        for bound in [0, 1, 2, 3] {
            let executor = ScriptedExecutor::paged(6);
            let outcome = relay(executor.clone(), Arc::default())
                .submit("SELECT * FROM T", PageBound::new(bound))
                .await
                .unwrap();

            assert_eq!(executor.calls().len() as u32, bound + 1, "bound {bound}");
            assert_eq!(outcome.pages_fetched, bound + 1);
            assert!(outcome.truncated);
        }
    }

    #[tokio::test]
    async fn test_single_page_without_token() {
        let executor = ScriptedExecutor::new([Ok(page(vec![order(9)], None))]);
        let outcome = relay(executor.clone(), Arc::default())
            .submit("SELECT * FROM Orders WHERE id = 'order-9'", PageBound::new(0))
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_empty_pages_still_follow_tokens() {
        let executor = ScriptedExecutor::new([
            Ok(page(vec![], Some("t1".to_string()))),
            Ok(page(vec![], Some("t2".to_string()))),
            Ok(page(vec![order(1)], None)),
        ]);
        let outcome = relay(executor.clone(), Arc::default())
            .submit("SELECT * FROM Orders", PageBound::DEFAULT)
            .await
            .unwrap();

        assert_eq!(executor.calls().len(), 3);
        assert_eq!(outcome.records.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_discards_earlier_pages() {
        let executor = ScriptedExecutor::new([
            Ok(page(vec![order(1), order(2)], Some("page-2".to_string()))),
            Err(ExecuteError::service(
                "ProvisionedThroughputExceededException",
                "Rate exceeded",
            )),
        ]);
        let log = Arc::new(RecordingLog::default());

        let err = relay(executor.clone(), log.clone())
            .submit("SELECT * FROM Orders", PageBound::DEFAULT)
            .await
            .unwrap_err();

        let RelayError::Execute {
            classified,
            pages_completed,
        } = err;
        assert_eq!(pages_completed, 1);
        assert_eq!(classified.category, ErrorCategory::Transient);
        assert!(classified.message.starts_with("Request rate is too high."));
        assert!(classified.message.ends_with("Error: Rate exceeded"));

        assert_eq!(executor.calls().len(), 2);
        assert_eq!(
            log.events().last(),
            Some(&Event::Failed(ErrorCategory::Transient, 1))
        );
        assert!(!log
            .events()
            .iter()
            .any(|e| matches!(e, Event::Completed(..))));
    }

    #[tokio::test]
    async fn test_failure_on_first_call() {
        let executor = ScriptedExecutor::new([Err(ExecuteError::uncoded("connection refused"))]);
        let err = relay(executor, Arc::default())
            .submit("SELECT * FROM Orders", PageBound::DEFAULT)
            .await
            .unwrap_err();

        assert_eq!(
            err.message(),
            "An exception occurred, investigate and configure retry strategy. \
             Error: connection refused"
        );
    }

    #[tokio::test]
    async fn test_item_limit_is_forwarded() {
        let executor = ScriptedExecutor::new([Ok(page(vec![], None)), Ok(page(vec![], None))]);

        relay(executor.clone(), Arc::default())
            .with_item_limit(Some(25))
            .submit("SELECT * FROM Orders", PageBound::DEFAULT)
            .await
            .unwrap();
        relay(executor.clone(), Arc::default())
            .with_item_limit(None)
            .submit("SELECT * FROM Orders", PageBound::DEFAULT)
            .await
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls[0].limit, Some(25));
        assert_eq!(calls[1].limit, None);
    }
}
