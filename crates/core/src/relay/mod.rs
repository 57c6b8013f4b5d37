//! Pagination driver for `ExecuteStatement` and its error vocabulary.

mod classify;
mod error;
mod http_mapping;
mod pagination;
mod requests;
mod traits;
mod types;

pub use classify::{classify, ClassifiedError, ErrorCategory, ErrorCode};
pub use error::{ExecuteError, RelayError, Result};
pub use http_mapping::relay_error_to_status_code;
pub use pagination::{QueryRelay, DEFAULT_ITEM_LIMIT};
pub use requests::{ErrorResponse, SubmitQueryRequest};
pub use traits::{NoopQueryLog, QueryLog, StatementExecutor};
pub use types::{ExecuteStatementInput, PageBound, QueryOutcome, StatementPage};
