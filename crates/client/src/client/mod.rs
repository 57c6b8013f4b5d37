//! HTTP client for the dynoql API.

pub mod health;
pub mod query;

use dynoql_core::relay::ErrorResponse;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ClientError, Result};

/// Shown when an error response carries no JSON message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// HTTP client for the dynoql API.
#[derive(Debug, Clone)]
pub struct DynoqlClient {
    client: reqwest::Client,
    base_url: String,
}

impl DynoqlClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(self.server_error(response).await)
        }
    }

    /// Handle responses without a body.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.server_error(response).await)
        }
    }

    async fn server_error(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        ClientError::ServerError {
            status,
            message: error_message(content_type.as_deref(), &body),
        }
    }
}

/// Extract the `message` of a JSON error body, or fall back to a generic one.
pub fn error_message(content_type: Option<&str>, body: &str) -> String {
    content_type
        .filter(|ct| ct.contains("application/json"))
        .and_then(|_| serde_json::from_str::<ErrorResponse>(body).ok())
        .map(|error| error.message)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
