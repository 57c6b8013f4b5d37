//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the
//! `StatementExecutor` trait using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod executor;

pub use client::AwsConfig;
pub use executor::DynamoDbExecutor;
