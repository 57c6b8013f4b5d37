use std::{env, time::Duration};

use dynoql_core::relay::DEFAULT_ITEM_LIMIT;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Items requested per `ExecuteStatement` call (default: 1,000).
    /// Zero or a negative value lets DynamoDB pick.
    pub item_limit: i32,
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNOQL_ITEM_LIMIT` - Items per ExecuteStatement call (default: 1,000)
    /// - `DYNOQL_REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            item_limit: env::var("DYNOQL_ITEM_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ITEM_LIMIT),
            request_timeout_seconds: env::var("DYNOQL_REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Get the per-call item limit, if any.
    pub fn item_limit(&self) -> Option<i32> {
        (self.item_limit > 0).then_some(self.item_limit)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            item_limit: DEFAULT_ITEM_LIMIT,
            request_timeout_seconds: 30,
        }
    }
}
