//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror. The cache itself cannot
//! fail; everything here originates in request validation or the upstream
//! fetch layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request parameters from the client
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream rejected the configured API key (HTTP 403)
    #[error("NASA API key is invalid or rate limited")]
    KeyRejected,

    /// Upstream rate limit exceeded (HTTP 429)
    #[error("NASA API rate limit exceeded, please try again later")]
    RateLimited,

    /// Upstream returned a non-2xx status
    #[error("Upstream API error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream returned data we could not use
    #[error("No data available: {0}")]
    NoData(String),

    /// Network-level failure reaching the upstream
    #[error("Failed to reach upstream API: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream payload did not match the expected shape
    #[error("Unexpected upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NoData(_) => StatusCode::NOT_FOUND,
            ApiError::KeyRejected
            | ApiError::UpstreamStatus { .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ApiError>;
