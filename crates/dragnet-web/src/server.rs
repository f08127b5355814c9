use std::net::SocketAddr;

use axum::middleware::from_fn;
use axum::Router;
use dragnet_config::ServerConfig;
use tower_http::cors::CorsLayer;

use crate::middleware::log_requests;
use crate::routes::{catalog_routes, health_routes, options_routes, query_routes};
use crate::state::AppState;
use crate::{Result, WebError};

/// Assembles the full router. Split out of [`start_server`] so tests can
/// drive it without a listener.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .merge(query_routes())
        .merge(catalog_routes())
        .merge(options_routes())
        .with_state(state)
        .merge(health_routes())
        .layer(from_fn(log_requests));

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = router(state, config.enable_cors);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;

    tracing::info!("Starting query service on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(WebError::Io)?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(WebError::Io)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use dragnet_core::test_support::StaticExecutor;

    use super::router;
    use crate::testing;

    fn empty_app() -> axum::Router {
        router(testing::state(Arc::new(StaticExecutor::new(&[], vec![]))), true)
    }

    // ===== Cross-cutting behavior =====

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = testing::get(empty_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"), "body: {body}");
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let (status, _) = testing::get(empty_app(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = testing::get(empty_app(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_result_set_is_an_empty_array() {
        let (status, body) = testing::get(empty_app(), "/api/query?dn=node").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }
}
