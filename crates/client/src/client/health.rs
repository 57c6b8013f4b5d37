//! Health check operations.

use super::DynoqlClient;
use crate::error::Result;

impl DynoqlClient {
    /// Liveness probe.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response).await
    }
}
