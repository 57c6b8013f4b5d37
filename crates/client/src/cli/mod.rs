//! CLI command definitions.

pub mod query;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the dynoql API.
#[derive(Debug, Parser)]
#[command(name = "dynoql-client")]
#[command(about = "Submit PartiQL statements to a dynoql server", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "DYNOQL_URL", default_value = "http://localhost:3001")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Records laid out as a grid.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a statement and print the records.
    Query(query::QueryCommand),
    /// Check that the server is live.
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "dynoql-client",
            "--format",
            "json",
            "query",
            "SELECT * FROM Orders",
            "--max-page-size",
            "3",
        ])
        .unwrap();

        assert!(matches!(cli.format, OutputFormat::Json));
        let Commands::Query(query) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(query.statement.as_deref(), Some("SELECT * FROM Orders"));
        assert_eq!(query.max_page_size, 3);
    }

    #[test]
    fn test_statement_and_file_conflict() {
        let result = Cli::try_parse_from([
            "dynoql-client",
            "query",
            "SELECT * FROM Orders",
            "--file",
            "orders.sql",
        ]);

        assert!(result.is_err());
    }
}
