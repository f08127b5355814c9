//! The execution seam: forward-only cursors and the executor trait.

use async_trait::async_trait;

use crate::error::ExecuteResult;
use crate::value::CellValue;

/// One fetched row, cells in column order.
pub type Row = Vec<CellValue>;

/// Forward-only view over a result set.
///
/// Implementations hold whatever backend resources the traversal needs and
/// release them on drop, so abandoning a cursor mid-stream is always safe.
#[async_trait]
pub trait RowCursor: Send {
    /// Column names, available before the first row is fetched.
    fn columns(&self) -> &[String];

    /// Fetch the next row, or `None` at end of stream.
    ///
    /// After an error or end of stream the cursor is exhausted and further
    /// calls return `None`.
    async fn next_row(&mut self) -> ExecuteResult<Option<Row>>;
}

/// Runs one parameterized statement and hands back a cursor.
///
/// `values` bind positionally to `$1..$N` in `sql`; implementations must
/// never splice them into the statement text.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str, values: &[String]) -> ExecuteResult<Box<dyn RowCursor>>;
}
