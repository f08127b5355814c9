//! Tabular CSV streaming.
//!
//! Header row of column names, then one record per row. Cells render as
//! text: NULL as `<nil>`, binary payloads decoded lossily, and anything
//! shaped like a database array literal (`{a,b}`) rewritten into a
//! semicolon-delimited form so the commas survive CSV.

use dragnet_core::{CellValue, RowCursor};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::{EncodeError, EncodeResult};
use crate::STREAM_BUFFER_SIZE;

/// Stream the whole cursor as CSV.
pub async fn stream_csv<W>(cursor: &mut dyn RowCursor, sink: W) -> EncodeResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut out = BufWriter::with_capacity(STREAM_BUFFER_SIZE, sink);
    let columns = cursor.columns().to_vec();

    out.write_all(&record_bytes(&columns)?).await?;
    let mut rows = 0usize;
    while let Some(row) = cursor.next_row().await? {
        let fields: Vec<String> = row.iter().map(cell_text).collect();
        out.write_all(&record_bytes(&fields)?).await?;
        rows += 1;
    }
    out.flush().await?;
    tracing::debug!(rows, "tabular projection complete");
    Ok(())
}

/// Render one cell for tabular output.
fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) if s.starts_with('{') && s.ends_with('}') => s
            .trim_matches(|c| c == '{' || c == '}')
            .replace(',', ";"),
        other => other.to_text(),
    }
}

/// Encode one record through the csv writer, quoting as needed.
fn record_bytes(fields: &[String]) -> EncodeResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;
    writer
        .into_inner()
        .map_err(|e| EncodeError::Write(std::io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragnet_core::test_support::{text_row, StaticRows};
    use test_case::test_case;

    async fn render(cursor: &mut StaticRows) -> String {
        let mut buf = Vec::new();
        stream_csv(cursor, &mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn header_then_rows() {
        let mut cursor = StaticRows::new(
            &["name", "ip"],
            vec![text_row(&["sw1", "10.0.0.1"]), text_row(&["sw2", "10.0.0.2"])],
        );
        assert_eq!(
            render(&mut cursor).await,
            "name,ip\nsw1,10.0.0.1\nsw2,10.0.0.2\n"
        );
    }

    #[tokio::test]
    async fn empty_result_is_header_only() {
        let mut cursor = StaticRows::new(&["a", "b"], vec![]);
        assert_eq!(render(&mut cursor).await, "a,b\n");
    }

    #[tokio::test]
    async fn null_cells_render_as_nil_marker() {
        let mut cursor = StaticRows::new(
            &["a", "b"],
            vec![vec![CellValue::Null, CellValue::Text("x".into())]],
        );
        assert_eq!(render(&mut cursor).await, "a,b\n<nil>,x\n");
    }

    #[tokio::test]
    async fn fields_with_commas_are_quoted() {
        let mut cursor = StaticRows::new(&["a"], vec![text_row(&["x, y"])]);
        assert_eq!(render(&mut cursor).await, "a\n\"x, y\"\n");
    }

    #[tokio::test]
    async fn array_cells_join_with_semicolons() {
        let mut cursor = StaticRows::new(
            &["tags"],
            vec![vec![CellValue::Array(vec![
                CellValue::Text("lldp".into()),
                CellValue::Text("snmp".into()),
            ])]],
        );
        assert_eq!(render(&mut cursor).await, "tags\nlldp;snmp\n");
    }

    // ===== Array Literal Rewrite Tests =====

    #[test_case("{a,b,c}", "a;b;c"; "plain literal")]
    #[test_case("{}", ""; "empty literal")]
    #[test_case("{single}", "single"; "one member")]
    #[test_case("plain text", "plain text"; "not a literal")]
    #[test_case("{unclosed", "{unclosed"; "missing brace untouched")]
    fn rewrites_array_literals(input: &str, expected: &str) {
        assert_eq!(cell_text(&CellValue::Text(input.to_string())), expected);
    }
}
