//! Statement submission.

use dynoql_core::attribute::DecodedRecord;
use dynoql_core::relay::{PageBound, SubmitQueryRequest};

use super::DynoqlClient;
use crate::error::Result;

impl DynoqlClient {
    /// Run a statement, following at most `max_page_size` continuation pages.
    pub async fn submit_query(
        &self,
        statement: &str,
        max_page_size: PageBound,
    ) -> Result<Vec<DecodedRecord>> {
        let request = SubmitQueryRequest {
            query: statement.to_string(),
            max_page_size,
        };
        let response = self
            .client
            .post(self.url("/submit-query"))
            .json(&request)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
