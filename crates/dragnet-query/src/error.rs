//! Compile-side error taxonomy.
//!
//! Everything here is a client-input problem: the request parameters could
//! not be turned into a statement. Execution failures live in
//! `dragnet-core`.

use thiserror::Error;

/// Errors raised while compiling request parameters into SQL.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Malformed identifier '{0}'")]
    MalformedIdentifier(String),

    #[error("Malformed link: {0}")]
    MalformedJoin(String),

    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Invalid limit '{0}': must be a non-negative integer")]
    InvalidLimit(String),

    #[error("Invalid order direction '{0}': expected 'asc' or 'desc'")]
    InvalidOrderDirection(String),

    #[error(
        "Placeholder audit failed: {distinct} distinct placeholders (max ${max}) for {values} values"
    )]
    PlaceholderMismatch {
        distinct: usize,
        max: usize,
        values: usize,
    },
}

/// Result type alias for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
