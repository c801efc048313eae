//! Convenience result type alias for the catalog API.

use crate::error::AppError;

/// A specialized `Result` type for catalog operations.
pub type AppResult<T> = Result<T, AppError>;
