//! Pure classification of DynamoDB error codes into advisory messages.
//!
//! The relay never retries. The advice is only shown to the person who
//! submitted the statement.

use std::fmt;

use serde::Serialize;

use super::error::ExecuteError;

const CATCH_ALL: &str = "An exception occurred, investigate and configure retry strategy.";

/// Broad origin of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Capacity or availability problems; retrying with back-off may succeed.
    Transient,
    /// The statement or the table setup must change before retrying.
    ClientInput,
    /// Credentials are wrong.
    Auth,
    /// No known code.
    Unknown,
}

/// DynamoDB error codes with dedicated advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConditionalCheckFailed,
    TransactionConflict,
    ItemCollectionSizeLimitExceeded,
    InternalServerError,
    ProvisionedThroughputExceeded,
    ResourceNotFound,
    ServiceUnavailable,
    Throttling,
    UnrecognizedClient,
    Validation,
    RequestLimitExceeded,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::ConditionalCheckFailed,
        ErrorCode::TransactionConflict,
        ErrorCode::ItemCollectionSizeLimitExceeded,
        ErrorCode::InternalServerError,
        ErrorCode::ProvisionedThroughputExceeded,
        ErrorCode::ResourceNotFound,
        ErrorCode::ServiceUnavailable,
        ErrorCode::Throttling,
        ErrorCode::UnrecognizedClient,
        ErrorCode::Validation,
        ErrorCode::RequestLimitExceeded,
    ];

    /// Looks up a code exactly as the service reports it.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.as_str() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ConditionalCheckFailed => "ConditionalCheckFailedException",
            ErrorCode::TransactionConflict => "TransactionConflictException",
            ErrorCode::ItemCollectionSizeLimitExceeded => {
                "ItemCollectionSizeLimitExceededException"
            }
            ErrorCode::InternalServerError => "InternalServerError",
            ErrorCode::ProvisionedThroughputExceeded => "ProvisionedThroughputExceededException",
            ErrorCode::ResourceNotFound => "ResourceNotFoundException",
            ErrorCode::ServiceUnavailable => "ServiceUnavailable",
            ErrorCode::Throttling => "ThrottlingException",
            ErrorCode::UnrecognizedClient => "UnrecognizedClientException",
            ErrorCode::Validation => "ValidationException",
            ErrorCode::RequestLimitExceeded => "RequestLimitExceeded",
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorCode::TransactionConflict
            | ErrorCode::InternalServerError
            | ErrorCode::ProvisionedThroughputExceeded
            | ErrorCode::ServiceUnavailable
            | ErrorCode::Throttling
            | ErrorCode::RequestLimitExceeded => ErrorCategory::Transient,
            ErrorCode::ConditionalCheckFailed
            | ErrorCode::ItemCollectionSizeLimitExceeded
            | ErrorCode::ResourceNotFound
            | ErrorCode::Validation => ErrorCategory::ClientInput,
            ErrorCode::UnrecognizedClient => ErrorCategory::Auth,
        }
    }

    /// Advice shown ahead of the service message.
    pub fn advice(self) -> &'static str {
        match self {
            ErrorCode::ConditionalCheckFailed => {
                "Condition check specified in the operation failed, review and update the \
                 condition check before retrying."
            }
            ErrorCode::TransactionConflict => {
                "Operation was rejected because there is an ongoing transaction for the item, \
                 generally safe to retry with exponential back-off."
            }
            ErrorCode::ItemCollectionSizeLimitExceeded => {
                "An item collection is too large, you're using Local Secondary Index and \
                 exceeded size limit of items per partition key. Consider using Global \
                 Secondary Index instead."
            }
            ErrorCode::InternalServerError => {
                "Internal Server Error, generally safe to retry with exponential back-off."
            }
            ErrorCode::ProvisionedThroughputExceeded => {
                "Request rate is too high. If you're using a custom retry strategy make sure to \
                 retry with exponential back-off. Otherwise consider reducing frequency of \
                 requests or increasing provisioned capacity for your table or secondary index."
            }
            ErrorCode::ResourceNotFound => {
                "One of the tables was not found, verify table exists before retrying."
            }
            ErrorCode::ServiceUnavailable => {
                "Had trouble reaching DynamoDB. generally safe to retry with exponential back-off."
            }
            ErrorCode::Throttling => {
                "Request denied due to throttling, generally safe to retry with exponential \
                 back-off."
            }
            ErrorCode::UnrecognizedClient => {
                "The request signature is incorrect most likely due to an invalid AWS access key \
                 ID or secret key, fix before retrying."
            }
            ErrorCode::Validation => {
                "The input fails to satisfy the constraints specified by DynamoDB, fix input \
                 before retrying."
            }
            ErrorCode::RequestLimitExceeded => {
                "Throughput exceeds the current throughput limit for your account, increase \
                 account level throughput before retrying."
            }
        }
    }
}

/// A failure turned into prose for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// The raw service code, known or not.
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Maps a failed call to its advisory message.
///
/// Known codes get their dedicated advice followed by the service message.
/// Anything else gets the catch-all advice followed by the service message,
/// or by the full error detail when no code came back at all.
pub fn classify(error: &ExecuteError) -> ClassifiedError {
    let Some(code) = error.code.as_deref() else {
        return ClassifiedError {
            category: ErrorCategory::Unknown,
            code: None,
            message: format!("{CATCH_ALL} Error: {}", error.detail),
        };
    };

    let (category, advice) = match ErrorCode::from_code(code) {
        Some(known) => (known.category(), known.advice()),
        None => (ErrorCategory::Unknown, CATCH_ALL),
    };

    ClassifiedError {
        category,
        code: Some(code.to_string()),
        message: format!("{advice} Error: {}", error.message_or_detail()),
    }
}
