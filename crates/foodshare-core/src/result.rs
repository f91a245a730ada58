//! Convenience result type alias for FoodShare.

use crate::error::AppError;

/// A specialized `Result` type for FoodShare operations.
pub type AppResult<T> = Result<T, AppError>;
