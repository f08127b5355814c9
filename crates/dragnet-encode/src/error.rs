//! Projection-side errors.
//!
//! Write and serialization failures are encoding errors; cursor failures
//! pass through untouched so callers can keep the execution taxonomy.

use dragnet_core::ExecuteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Unknown output format '{0}'")]
    UnknownFormat(String),

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Result type alias for projection operations.
pub type EncodeResult<T> = Result<T, EncodeError>;
