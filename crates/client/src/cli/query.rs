//! Query CLI command.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use dynoql_core::relay::PageBound;

use crate::error::{ClientError, Result};

/// Run a PartiQL statement.
///
/// The statement is read from the argument, from `--file`, or from stdin
/// when neither is given.
#[derive(Debug, Parser)]
pub struct QueryCommand {
    /// Statement to run, e.g. "SELECT * FROM Orders".
    #[arg(conflicts_with = "file")]
    pub statement: Option<String>,

    /// Read the statement from a file.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Continuation pages to follow after the first one.
    #[arg(long, short = 'm', default_value_t = PageBound::DEFAULT.get())]
    pub max_page_size: u32,
}

impl QueryCommand {
    /// Resolve the statement text, falling back to `stdin`.
    pub fn read_statement(&self, mut stdin: impl Read) -> Result<String> {
        let statement = match (&self.statement, &self.file) {
            (Some(statement), _) => statement.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                let mut buffer = String::new();
                stdin.read_to_string(&mut buffer)?;
                buffer
            }
        };

        let statement = statement.trim();
        if statement.is_empty() {
            return Err(ClientError::InvalidInput(
                "no statement given; pass one as an argument, with --file, or on stdin"
                    .to_string(),
            ));
        }
        Ok(statement.to_string())
    }
}
