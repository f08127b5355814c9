//! PostgreSQL backend for dragnet.
//!
//! Implements the `QueryExecutor` and `RowCursor` traits from
//! `dragnet-core` on top of `tokio-postgres`. Two details matter here:
//!
//! - Bound values travel to the server in the *text* format
//!   ([`TextParam`]), so the server's input functions coerce each string
//!   to whatever type it inferred for the placeholder. The compiler
//!   never learns column types and never needs to.
//! - Every result column decodes into the backend-neutral
//!   [`dragnet_core::CellValue`] via the accepts-anything [`PgCell`]
//!   wrapper, including a hand-rolled decode of the `inet`/`cidr` wire
//!   format that `tokio-postgres` does not cover natively.

pub mod executor;
pub mod param;
pub mod value;

pub use executor::{PgExecutor, PgRowCursor};
pub use param::TextParam;
pub use value::PgCell;
