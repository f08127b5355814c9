//! Execution-side error taxonomy.

use thiserror::Error;

/// Errors raised while running a statement or draining its cursor.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to prepare statement: {0}")]
    Prepare(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("Statement expects {expected} parameters, {got} supplied")]
    ParamCount { expected: usize, got: usize },
}

/// Result type alias for execution operations.
pub type ExecuteResult<T> = Result<T, ExecuteError>;
