//! Flat JSON streaming.
//!
//! Emits `[` then one JSON object per row then `]`, holding a single row
//! in memory at a time. Object keys keep the result set's column order.

use dragnet_core::{CellValue, RowCursor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::EncodeResult;
use crate::STREAM_BUFFER_SIZE;

/// One row as a JSON object, columns zipped with cells in order.
pub(crate) struct RowObject<'a> {
    pub columns: &'a [String],
    pub cells: &'a [CellValue],
}

impl Serialize for RowObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Stream the whole cursor as a JSON array of row objects.
pub async fn stream_flat<W>(cursor: &mut dyn RowCursor, sink: W) -> EncodeResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut out = BufWriter::with_capacity(STREAM_BUFFER_SIZE, sink);
    let columns = cursor.columns().to_vec();

    out.write_all(b"[").await?;
    let mut rows = 0usize;
    while let Some(row) = cursor.next_row().await? {
        if rows > 0 {
            out.write_all(b",").await?;
        }
        rows += 1;
        let object = serde_json::to_vec(&RowObject {
            columns: &columns,
            cells: &row,
        })?;
        out.write_all(&object).await?;
    }
    out.write_all(b"]").await?;
    out.flush().await?;
    tracing::debug!(rows, "flat projection complete");
    Ok(())
}
