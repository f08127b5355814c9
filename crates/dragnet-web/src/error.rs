use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dragnet_core::ExecuteError;
use dragnet_encode::EncodeError;
use dragnet_query::{CatalogError, CompileError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebError>;

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::Compile(_) => StatusCode::BAD_REQUEST,
            WebError::Catalog(CatalogError::UnknownQuery(_)) => StatusCode::NOT_FOUND,
            WebError::Catalog(CatalogError::ArgumentCount { .. }) => StatusCode::BAD_REQUEST,
            WebError::Encode(EncodeError::UnknownFormat(_)) => StatusCode::BAD_REQUEST,
            WebError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Execute(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Config(_) | WebError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Status mapping =====

    #[test]
    fn test_compile_errors_are_bad_requests() {
        let err = WebError::Compile(CompileError::InvalidLimit("abc".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_catalog_query_is_not_found() {
        let err = WebError::Catalog(CatalogError::UnknownQuery("nope".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_argument_count_is_bad_request() {
        let err = WebError::Catalog(CatalogError::ArgumentCount {
            name: "link-tips".to_string(),
            expected: 1,
            got: 0,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_format_is_bad_request() {
        let err = WebError::Encode(EncodeError::UnknownFormat("xml".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_execute_errors_are_server_errors() {
        let err = WebError::Execute(ExecuteError::Query("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
