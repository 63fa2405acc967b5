use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can surface, mapped to an HTTP status and a
/// `{"detail": ...}` payload. No error is retried or recovered internally.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Failed to fetch summaries: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Summary not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Summarization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(ref e) => {
                tracing::error!(error = ?e, "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
