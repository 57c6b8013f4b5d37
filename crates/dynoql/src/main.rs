mod app;
mod config;
mod handlers;
mod state;
mod storage;
mod telemetry;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use dynoql_core::relay::StatementExecutor;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};

use crate::{app::create_app, config::Config, state::AppState};

/// Dynoql - Run PartiQL statements against DynamoDB over HTTP
#[derive(Parser, Debug)]
#[command(name = "dynoql")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3001", env = "PORT")]
    port: u16,

    /// AWS region (defaults to eu-central-1)
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Custom DynamoDB endpoint (e.g. http://localhost:8000 for local DynamoDB)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Directory for JSON log files (app.log and requests.log)
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Serve pages from a fixture file instead of DynamoDB
    #[arg(long, env = "FIXTURES")]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing(cli.log_dir.as_deref())?;

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let executor = build_executor(&cli).await?;

    let state = AppState::new(executor, config);
    tracing::info!(
        item_limit = ?state.relay.item_limit(),
        timeout = ?state.config.request_timeout(),
        "Relay configured"
    );

    // Build the application router
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Select the statement executor: fixtures when given, DynamoDB otherwise.
async fn build_executor(cli: &Cli) -> Result<Arc<dyn StatementExecutor>> {
    if let Some(path) = &cli.fixtures {
        let executor = storage::inmemory::load_fixtures(path)?;
        return Ok(Arc::new(executor));
    }

    dynamodb_executor(cli).await
}

#[cfg(feature = "dynamodb")]
async fn dynamodb_executor(cli: &Cli) -> Result<Arc<dyn StatementExecutor>> {
    use storage::dynamodb::{AwsConfig, DynamoDbExecutor};

    let mut aws = AwsConfig::default();
    if let Some(region) = &cli.region {
        aws.region = region.clone();
    }
    if let Some(endpoint_url) = &cli.endpoint_url {
        aws.endpoint_url = Some(endpoint_url.clone());
    }

    tracing::info!(target_env = %aws.target_display(), "Using DynamoDB executor");
    Ok(Arc::new(DynamoDbExecutor::from_config(&aws).await))
}

#[cfg(not(feature = "dynamodb"))]
async fn dynamodb_executor(_cli: &Cli) -> Result<Arc<dyn StatementExecutor>> {
    anyhow::bail!("built without the `dynamodb` feature; pass --fixtures to serve fixture pages")
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
