//! HTTP surface for the dragnet query service.
//!
//! Routes split by concern: ad-hoc parameter queries under `/api/query`,
//! the canned query catalog under `/api/catalog`, operator discovery
//! under `/api/options`, and liveness probes. Result sets stream to the
//! client through a duplex pipe so a million-row query never
//! materializes in memory.

pub mod routes;
pub mod server;

mod error;
mod middleware;
mod state;
mod stream;

pub use error::{Result, WebError};
pub use server::{router, start_server};
pub use state::AppState;
