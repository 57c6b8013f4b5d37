//! Pure functions for mapping relay errors to HTTP status codes.

use super::RelayError;

/// Maps a [`RelayError`] to an HTTP status code.
///
/// Every execution failure is reported as 500, whatever its category: the
/// caller only gets the advisory message, never a structured code.
///
/// # Examples
///
/// ```
/// use dynoql_core::relay::{classify, relay_error_to_status_code, ExecuteError, RelayError};
///
/// let error = RelayError::Execute {
///     classified: classify(&ExecuteError::service("ValidationException", "bad statement")),
///     pages_completed: 0,
/// };
/// assert_eq!(relay_error_to_status_code(&error), 500);
/// ```
pub fn relay_error_to_status_code(error: &RelayError) -> u16 {
    match error {
        RelayError::Execute { .. } => 500,
    }
}
