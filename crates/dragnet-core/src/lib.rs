//! Core abstractions shared by every dragnet crate.
//!
//! This crate defines the seam between the query compiler and whatever
//! backend actually runs the SQL: a tagged [`CellValue`] decoded once at the
//! cursor boundary, the [`RowCursor`] and [`QueryExecutor`] traits, and the
//! execution error taxonomy. It deliberately knows nothing about any
//! concrete database driver.

pub mod cursor;
pub mod error;
pub mod test_support;
pub mod value;

pub use cursor::{QueryExecutor, Row, RowCursor};
pub use error::{ExecuteError, ExecuteResult};
pub use value::CellValue;
