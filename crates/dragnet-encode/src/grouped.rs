//! Grouped JSON projections.
//!
//! Rows bucket under one or two key columns and the whole object is
//! emitted at end of traversal. Unlike the flat projection this holds the
//! full result set; the tradeoff is documented at the API surface, and
//! `limit` remains the caller's tool for bounding it.

use std::collections::BTreeMap;

use dragnet_core::{CellValue, Row, RowCursor};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::EncodeResult;

type RowValue = serde_json::Value;

/// Stream the cursor into a grouped JSON object.
///
/// Group keys are the stringified cell of the key column; a row missing
/// the column groups under the empty key. Keys emit in sorted order, rows
/// within a group keep cursor order.
pub async fn stream_grouped<W>(
    cursor: &mut dyn RowCursor,
    key: &str,
    key2: Option<&str>,
    sink: W,
) -> EncodeResult<()>
where
    W: AsyncWrite + Unpin,
{
    let columns = cursor.columns().to_vec();
    let key_idx = columns.iter().position(|c| c == key);
    let key2_idx = key2.and_then(|k| columns.iter().position(|c| c == k));

    let mut rows = 0usize;
    let body = match key2 {
        None => {
            let mut groups: BTreeMap<String, Vec<RowValue>> = BTreeMap::new();
            while let Some(row) = cursor.next_row().await? {
                groups
                    .entry(key_of(&row, key_idx))
                    .or_default()
                    .push(row_value(&columns, &row));
                rows += 1;
            }
            serde_json::to_vec(&groups)?
        }
        Some(_) => {
            let mut groups: BTreeMap<String, BTreeMap<String, Vec<RowValue>>> = BTreeMap::new();
            while let Some(row) = cursor.next_row().await? {
                groups
                    .entry(key_of(&row, key_idx))
                    .or_default()
                    .entry(key_of(&row, key2_idx))
                    .or_default()
                    .push(row_value(&columns, &row));
                rows += 1;
            }
            serde_json::to_vec(&groups)?
        }
    };

    let mut out = sink;
    out.write_all(&body).await?;
    out.flush().await?;
    tracing::debug!(rows, "grouped projection complete");
    Ok(())
}

fn key_of(row: &Row, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(CellValue::to_text)
        .unwrap_or_default()
}

fn row_value(columns: &[String], row: &Row) -> RowValue {
    let map: serde_json::Map<String, serde_json::Value> = columns
        .iter()
        .zip(row)
        .map(|(column, cell)| (column.clone(), cell.to_json()))
        .collect();
    serde_json::Value::Object(map)
}
