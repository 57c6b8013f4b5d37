use serde::{Deserialize, Serialize};

use crate::serde::deserialize_page_bound;

use super::types::PageBound;

/// Body of `POST /submit-query`.
///
/// `maxPageSize` accepts a number or a numeric string and falls back to
/// [`PageBound::DEFAULT`]. A missing `query` is forwarded as an empty
/// statement and left for the database to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "deserialize_page_bound")]
    pub max_page_size: PageBound,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
