use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure to produce a draw from the upstream site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Page fetched, but no usable draw in it (not held yet, or wording changed).
    #[error("no lottery data for draw {0}")]
    NotFound(u32),

    /// Network failure, timeout or non-2xx status.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with something that isn't the expected JSON.
    #[error("malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Fetch(FetchError::NotFound(draw_no)) => {
                tracing::debug!(draw_no, "no data for draw");
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "returnValue": "fail", "error": self.to_string() })),
                )
                    .into_response()
            }
            ApiError::Fetch(err) => {
                tracing::error!(error = ?err, "upstream fetch failed");
                internal(err.to_string())
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                internal(err.to_string())
            }
        }
    }
}

fn internal(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
}
