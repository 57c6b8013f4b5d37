//! Fixture files for offline use of the in-memory executor.
//!
//! A fixture file holds the pages to serve, with items in DynamoDB's wire
//! format:
//!
//! ```json
//! { "pages": [ { "items": [ { "id": { "S": "order-1" } } ] } ] }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use dynoql_core::relay::StatementPage;

use super::InMemoryExecutor;

/// Errors that can occur when loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixtures from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid fixtures in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    pages: Vec<StatementPage>,
}

/// Parse fixture pages from JSON text.
pub fn parse_fixtures(json: &str) -> Result<Vec<StatementPage>, serde_json::Error> {
    serde_json::from_str::<FixtureFile>(json).map(|file| file.pages)
}

/// Load an in-memory executor from a fixture file.
pub fn load_fixtures(path: &Path) -> Result<InMemoryExecutor, FixtureError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pages = parse_fixtures(&contents).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), pages = pages.len(), "Loaded fixtures");

    Ok(InMemoryExecutor::new(pages))
}
