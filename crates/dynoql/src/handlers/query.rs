//! Statement submission handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use dynoql_core::attribute::DecodedRecord;
use dynoql_core::relay::SubmitQueryRequest;

use crate::{handlers::AppError, state::AppState};

/// Use the caller's `x-request-id` when it is a UUID, otherwise mint one.
fn extract_query_id(headers: &HeaderMap) -> Uuid {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Execute a PartiQL statement (POST /submit-query).
///
/// Returns every decoded record as a JSON array, or `{ "message": ... }`
/// with status 500 when any page fails.
pub async fn submit_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitQueryRequest>, JsonRejection>,
) -> Result<Json<Vec<DecodedRecord>>, AppError> {
    let Json(request) = payload?;

    let span = tracing::info_span!("submit_query", query_id = %extract_query_id(&headers));
    let outcome = state
        .relay
        .submit(&request.query, request.max_page_size)
        .instrument(span)
        .await?;

    Ok(Json(outcome.records))
}
