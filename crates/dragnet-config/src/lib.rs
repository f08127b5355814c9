//! Configuration for the dragnet query service.
//!
//! Loads a TOML file describing the listen address, the database
//! connection, and optional column type declarations for the query
//! compiler. Every section is optional and falls back to defaults, so a
//! minimal deployment runs with no file at all.
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! host = "db.internal"
//! dbname = "inventory"
//!
//! [schema.types]
//! ip = "network"
//! first_seen = "timestamp"
//! ```
//!
//! This crate deliberately depends on nothing else in the workspace.
//! Config is the foundation layer, and type names under `[schema.types]`
//! stay plain strings here; the binary validates them when it builds the
//! compiler's catalog.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{DatabaseConfig, DragnetConfig, SchemaConfig, ServerConfig};
