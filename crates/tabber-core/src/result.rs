//! Convenience result type alias for Tabber.

use crate::error::AppError;

/// A specialized `Result` type for Tabber operations.
pub type AppResult<T> = Result<T, AppError>;
