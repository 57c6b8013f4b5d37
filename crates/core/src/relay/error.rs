use std::fmt;

use thiserror::Error;

use super::classify::ClassifiedError;

/// A failed `ExecuteStatement` call, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteError {
    /// Service error code, e.g. `ValidationException`. `None` when the call
    /// never produced a service response (timeouts, dispatch failures).
    pub code: Option<String>,
    /// Service error message, when the service sent one.
    pub message: Option<String>,
    /// Full rendering of the underlying error.
    pub detail: String,
}

impl ExecuteError {
    /// An error returned by the service with a code and a message.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        Self {
            detail: format!("{code}: {message}"),
            code: Some(code),
            message: Some(message),
        }
    }

    /// An error that carries no service code.
    pub fn uncoded(detail: impl Into<String>) -> Self {
        Self {
            code: None,
            message: None,
            detail: detail.into(),
        }
    }

    /// The service message, or the full detail when there is none.
    pub fn message_or_detail(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.detail)
    }
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for ExecuteError {}

/// Errors returned by [`super::QueryRelay::submit`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// An `ExecuteStatement` call failed. Records from earlier pages are discarded.
    #[error("{classified}")]
    Execute {
        classified: ClassifiedError,
        /// Pages that completed before the failing call.
        pages_completed: u32,
    },
}

impl RelayError {
    /// The advisory message shown to the caller.
    pub fn message(&self) -> &str {
        match self {
            RelayError::Execute { classified, .. } => &classified.message,
        }
    }
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
