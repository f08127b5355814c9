//! The canned query catalog: discovery plus execution by name.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use dragnet_encode::OutputMode;
use dragnet_query::{CatalogInfo, RequestParams};

use crate::error::Result;
use crate::state::AppState;
use crate::stream::execute_streaming;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/catalog", get(list_queries))
        .route("/api/catalog/{name}", get(run_named))
        .route("/api/catalog/{name}/{*args}", get(run_named_with_args))
}

async fn list_queries(State(state): State<AppState>) -> Json<Vec<CatalogInfo>> {
    Json(state.catalog.listing("/api/catalog"))
}

async fn run_named(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    serve_named(&state, &name, &[], &pairs).await
}

/// Positional arguments ride in the path, one segment per `$N`. A
/// trailing slash only adds an empty segment, so empties are dropped.
async fn run_named_with_args(
    State(state): State<AppState>,
    Path((name, args)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let args: Vec<String> = args
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    serve_named(&state, &name, &args, &pairs).await
}

/// Canned queries stream through the same projections as ad-hoc ones, so
/// `format`, `groupby` and `groupby2` all apply here too.
async fn serve_named(
    state: &AppState,
    name: &str,
    args: &[String],
    pairs: &[(String, String)],
) -> Result<Response> {
    let params = RequestParams::from_pairs(pairs);
    let mode = OutputMode::from_request(
        params.format.as_deref(),
        params.group_by.as_deref(),
        params.group_by2.as_deref(),
    )?;
    let compiled = state.catalog.bind(name, args)?;
    tracing::debug!(query = name, args = ?args, "serving catalog query");
    execute_streaming(state, &compiled, &mode).await
}
