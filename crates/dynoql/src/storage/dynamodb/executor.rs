//! DynamoDB statement executor.
//!
//! Implements `StatementExecutor` from `dynoql_core::relay` with the
//! `ExecuteStatement` PartiQL API.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use dynoql_core::relay::{ExecuteError, ExecuteStatementInput, StatementExecutor, StatementPage};

use super::client::{create_client, AwsConfig};
use super::conversions::item_from_sdk;
use super::error::map_execute_statement_error;

/// DynamoDB-based statement executor.
pub struct DynamoDbExecutor {
    client: Client,
}

impl DynamoDbExecutor {
    /// Creates a new executor with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new executor from AWS configuration.
    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(create_client(config).await)
    }
}

#[async_trait]
impl StatementExecutor for DynamoDbExecutor {
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<StatementPage, ExecuteError> {
        let result = self
            .client
            .execute_statement()
            .statement(input.statement)
            .set_parameters(None)
            .set_next_token(input.next_token)
            .set_limit(input.limit)
            .send()
            .await
            .map_err(map_execute_statement_error)?;

        let items = result.items.unwrap_or_default();
        Ok(StatementPage {
            items: items.iter().map(item_from_sdk).collect(),
            next_token: result.next_token,
        })
    }
}
