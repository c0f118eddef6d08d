use crate::error::AppError;

/// Shorthand for `Result<T, AppError>`, the return type of nearly every
/// fallible function in the workspace.
pub type AppResult<T> = Result<T, AppError>;
