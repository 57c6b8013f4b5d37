//! Statement executor backends.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;
