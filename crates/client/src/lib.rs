//! dynoql_client - CLI client for the dynoql API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::DynoqlClient;
pub use error::{ClientError, Result};
