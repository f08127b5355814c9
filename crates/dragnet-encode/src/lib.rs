//! Streaming result projections.
//!
//! A [`RowCursor`](dragnet_core::RowCursor) goes in, bytes come out in one
//! of three shapes: a flat JSON array, CSV, or a grouped JSON object. The
//! flat and tabular projections hold one row at a time and flush through a
//! bounded buffer; the grouped projection materializes the result set and
//! says so in its docs. Write failures and cursor failures stay distinct
//! in [`EncodeError`] so the transport can tell a gone client from a
//! broken query.

pub mod csv;
pub mod error;
pub mod grouped;
pub mod json;
pub mod mode;

pub use error::{EncodeError, EncodeResult};
pub use mode::OutputMode;

use dragnet_core::RowCursor;
use tokio::io::AsyncWrite;

/// Buffered writes flush to the sink in chunks of at most this size.
pub const STREAM_BUFFER_SIZE: usize = 64 * 1024;

/// Drive one cursor through the projection for `mode`.
pub async fn project<W>(
    cursor: &mut dyn RowCursor,
    mode: &OutputMode,
    sink: W,
) -> EncodeResult<()>
where
    W: AsyncWrite + Unpin,
{
    match mode {
        OutputMode::Flat => json::stream_flat(cursor, sink).await,
        OutputMode::Tabular => csv::stream_csv(cursor, sink).await,
        OutputMode::Grouped { key, key2 } => {
            grouped::stream_grouped(cursor, key, key2.as_deref(), sink).await
        }
    }
}
