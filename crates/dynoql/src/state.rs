//! Shared application state.
//!
//! Holds the query relay handed to every request handler. The relay wraps
//! the statement executor selected at startup.

use std::sync::Arc;

use dynoql_core::relay::{QueryRelay, StatementExecutor};

use crate::{config::Config, storage::inmemory::InMemoryExecutor, telemetry::TracingQueryLog};

/// Shared application state.
///
/// This is cloned for each request handler. Cloning only bumps the `Arc`
/// counts inside the relay.
#[derive(Clone)]
pub struct AppState {
    /// Pagination driver for `ExecuteStatement`.
    pub relay: QueryRelay,
    /// Runtime tunables.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around `executor`, logging through tracing.
    pub fn new(executor: Arc<dyn StatementExecutor>, config: Config) -> Self {
        let relay = QueryRelay::new(executor, Arc::new(TracingQueryLog))
            .with_item_limit(config.item_limit());

        Self {
            relay,
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    /// An in-memory executor without any pages (for testing).
    fn default() -> Self {
        Self::new(Arc::new(InMemoryExecutor::default()), Config::default())
    }
}
