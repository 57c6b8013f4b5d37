pub mod error;
pub mod health;
pub mod query;

pub use error::AppError;
