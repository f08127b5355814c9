//! Bridges a row cursor into a streaming response body.

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use dragnet_core::RowCursor;
use dragnet_encode::{project, OutputMode, STREAM_BUFFER_SIZE};
use dragnet_query::CompiledQuery;
use tokio_util::io::ReaderStream;

use crate::error::Result;
use crate::state::AppState;

/// Runs a compiled statement and streams the projection straight into
/// the response body.
///
/// The projection task writes into one end of a duplex pipe while the
/// body reads from the other, so backpressure from a slow client stalls
/// the cursor instead of buffering rows. A failure after the first byte
/// can only truncate the stream; the status line is already gone.
pub(crate) async fn execute_streaming(
    state: &AppState,
    compiled: &CompiledQuery,
    mode: &OutputMode,
) -> Result<Response> {
    let cursor = state
        .executor
        .execute(&compiled.sql, &compiled.values)
        .await?;
    let body = stream_body(cursor, mode.clone());
    Ok(([(header::CONTENT_TYPE, mode.content_type())], body).into_response())
}

fn stream_body(mut cursor: Box<dyn RowCursor>, mode: OutputMode) -> Body {
    let (writer, reader) = tokio::io::duplex(STREAM_BUFFER_SIZE);
    tokio::spawn(async move {
        if let Err(err) = project(cursor.as_mut(), &mode, writer).await {
            tracing::error!(error = %err, "streaming projection aborted");
        }
    });
    Body::from_stream(ReaderStream::new(reader))
}
