//! DynamoDB error mapping.
//!
//! Reduces AWS SDK errors to the `ExecuteError` the relay classifies.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::execute_statement::ExecuteStatementError;
use dynoql_core::relay::ExecuteError;

/// Map an ExecuteStatement SDK error to ExecuteError.
///
/// Service errors keep their code and message; failures that never reached
/// the service (timeouts, dispatch and construction failures) carry no code.
pub fn map_execute_statement_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ExecuteStatementError, R>,
) -> ExecuteError {
    let code = err.code().map(str::to_string);
    let message = err.message().map(str::to_string);
    let detail = DisplayErrorContext(&err).to_string();
    execute_error_from_parts(code, message, detail)
}

/// Assemble an ExecuteError from already extracted error metadata.
pub fn execute_error_from_parts(
    code: Option<String>,
    message: Option<String>,
    detail: String,
) -> ExecuteError {
    ExecuteError {
        code: code.filter(|c| !c.is_empty()),
        message: message.filter(|m| !m.is_empty()),
        detail,
    }
}
