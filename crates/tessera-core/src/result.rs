//! Application-wide result alias.

use crate::error::AppError;

/// Result type used across all Tessera crates.
pub type AppResult<T> = Result<T, AppError>;
