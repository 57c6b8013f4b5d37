//! Tracing setup and the tracing-backed query log.

use std::{
    fs::{self, File, OpenOptions},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use dynoql_core::relay::{ClassifiedError, PageBound, QueryLog, QueryOutcome};
use tracing::Subscriber;
use tracing_subscriber::{
    filter::filter_fn, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};

const DEFAULT_FILTER: &str = "dynoql=debug,tower_http=debug";

/// Initialize the global tracing subscriber.
///
/// Events always go to stdout. When `log_dir` is given, they are also written
/// as JSON lines to `app.log`, with HTTP request events split into
/// `requests.log`.
pub fn init_tracing(log_dir: Option<&Path>) -> Result<()> {
    let file_layers = log_dir.map(file_layers).transpose()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layers)
        .try_init()?;

    Ok(())
}

/// JSON layers writing application events to `app.log` and `tower_http`
/// events to `requests.log` inside `dir`.
fn file_layers<S>(dir: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(dir).with_context(|| format!("creating log directory {}", dir.display()))?;

    let app = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(Arc::new(open_log(&dir.join("app.log"))?))
        .with_filter(filter_fn(|meta| !is_request_event(meta.target())));
    let requests = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(Arc::new(open_log(&dir.join("requests.log"))?))
        .with_filter(filter_fn(|meta| is_request_event(meta.target())));

    Ok(app.and_then(requests))
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

fn is_request_event(target: &str) -> bool {
    target.starts_with("tower_http")
}

/// [`QueryLog`] that reports relay progress as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingQueryLog;

impl QueryLog for TracingQueryLog {
    fn query_received(&self, statement: &str, bound: PageBound) {
        tracing::info!(statement, max_page_size = bound.get(), "Query received");
    }

    fn page_fetched(&self, page: u32, items: usize, has_more: bool) {
        tracing::debug!(page, items, has_more, "Page fetched");
    }

    fn query_completed(&self, outcome: &QueryOutcome) {
        tracing::info!(
            records = outcome.records.len(),
            pages = outcome.pages_fetched,
            truncated = outcome.truncated,
            "Query produced results"
        );
    }

    fn query_failed(&self, error: &ClassifiedError, pages_completed: u32) {
        tracing::error!(
            category = ?error.category,
            code = error.code.as_deref().unwrap_or("none"),
            pages_completed,
            message = %error.message,
            "Error occurred during query"
        );
    }
}
