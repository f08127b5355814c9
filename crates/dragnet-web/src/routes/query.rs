//! The ad-hoc parameter query endpoint.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use dragnet_encode::OutputMode;
use dragnet_query::RequestParams;

use crate::error::Result;
use crate::state::AppState;
use crate::stream::execute_streaming;

pub fn query_routes() -> Router<AppState> {
    Router::new().route("/api/query", get(run_query))
}

/// Compiles the request's parameter list into one SELECT and streams the
/// result in the requested projection. Pairs arrive as a raw list
/// because `filter`, `link`, `select` and `orderby` all repeat.
async fn run_query(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let params = RequestParams::from_pairs(&pairs);
    let mode = OutputMode::from_request(
        params.format.as_deref(),
        params.group_by.as_deref(),
        params.group_by2.as_deref(),
    )?;
    let compiled = state.compiler.compile(&params)?;
    tracing::debug!(sql = %compiled.sql, values = ?compiled.values, "compiled ad-hoc query");
    execute_streaming(&state, &compiled, &mode).await
}
