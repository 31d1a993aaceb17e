//! Convenience result type alias for codex.

use crate::error::AppError;

/// A specialized `Result` type for codex operations.
pub type AppResult<T> = Result<T, AppError>;
