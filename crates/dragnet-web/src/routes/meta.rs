//! Discovery of the operator vocabulary.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn options_routes() -> Router<AppState> {
    Router::new().route("/api/options", get(query_options))
}

/// Lists every operator token each semantic type accepts, so clients can
/// build filter pickers without hardcoding the vocabulary.
async fn query_options(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "type_operators": state.compiler.operators().allowed(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use dragnet_core::test_support::StaticExecutor;

    use crate::server::router;
    use crate::testing;

    #[tokio::test]
    async fn test_options_lists_operator_vocabulary() {
        let state = testing::state(Arc::new(StaticExecutor::new(&[], vec![])));
        let (status, body) = testing::get(router(state, false), "/api/options").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("type_operators"), "body: {body}");
        assert!(body.contains(r#""text""#), "body: {body}");
        assert!(body.contains("istartswith"), "body: {body}");
        assert!(body.contains("contained_by_or_eq"), "body: {body}");
    }
}
