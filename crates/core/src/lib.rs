//! dynoql_core - functional core of the dynoql PartiQL relay.
//!
//! Everything in this crate is free of I/O: the DynamoDB attribute model and
//! its decoder, page bound coercion, error classification, and the pagination
//! driver, which talks to the database only through [`relay::StatementExecutor`].

pub mod attribute;
pub mod relay;
pub mod serde;
