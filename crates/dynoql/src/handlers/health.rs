//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)

use axum::http::StatusCode;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Does not reach out to DynamoDB.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
