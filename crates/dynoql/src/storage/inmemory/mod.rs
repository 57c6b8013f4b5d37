//! In-memory storage backend for tests and offline development.

mod executor;
mod fixtures;

pub use executor::InMemoryExecutor;
pub use fixtures::load_fixtures;
