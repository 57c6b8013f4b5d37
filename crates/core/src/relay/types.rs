use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{DecodedRecord, RawItem};

/// Upper bound on pagination iterations for one submission.
///
/// The bound counts pages, not items. Because the first page is always
/// fetched before the bound is checked, a bound of `n` allows up to `n + 1`
/// fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageBound(u32);

impl PageBound {
    /// Bound used when the caller sends none or sends something non-numeric.
    pub const DEFAULT: PageBound = PageBound(10);

    pub const fn new(pages: u32) -> Self {
        Self(pages)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageBound {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for PageBound {
    fn from(pages: u32) -> Self {
        Self(pages)
    }
}

impl fmt::Display for PageBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One call to DynamoDB's `ExecuteStatement`.
///
/// Statements are always sent without bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteStatementInput {
    pub statement: String,
    pub next_token: Option<String>,
    pub limit: Option<i32>,
}

/// One page of results from `ExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPage {
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default, rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Decoded records accumulated across every fetched page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    /// Records in page-then-item order.
    pub records: Vec<DecodedRecord>,
    /// Number of `ExecuteStatement` calls made.
    pub pages_fetched: u32,
    /// A continuation token was still pending when the bound stopped the loop.
    pub truncated: bool,
}
