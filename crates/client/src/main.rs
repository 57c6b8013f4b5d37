//! dynoql-client CLI entry point.

use clap::Parser;
use dynoql_client::cli::{Cli, Commands, OutputFormat};
use dynoql_client::client::DynoqlClient;
use dynoql_client::output::format_records;
use dynoql_client::Result;
use dynoql_core::relay::PageBound;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = DynoqlClient::new(&cli.base_url);

    match cli.command {
        Commands::Query(query_cmd) => {
            let statement = query_cmd.read_statement(std::io::stdin())?;
            let records = client
                .submit_query(&statement, PageBound::new(query_cmd.max_page_size))
                .await?;

            println!("{}", format_records(&records, cli.format));
            if !cli.quiet && matches!(cli.format, OutputFormat::Pretty) && !records.is_empty() {
                println!("\n{} record(s)", records.len());
            }
        }
        Commands::Health => {
            client.livez().await?;
            if !cli.quiet {
                match cli.format {
                    OutputFormat::Json => println!(r#"{{"status":"ok"}}"#),
                    OutputFormat::Pretty => println!("Server at {} is live", client.base_url()),
                }
            }
        }
    }

    Ok(())
}
