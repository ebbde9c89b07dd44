//! Request-boundary errors and their HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Every way a humanize request can fail. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please provide text to humanize")]
    MissingText,

    #[error("Text exceeds 1000 words limit")]
    TooManyWords,

    /// Body was not valid JSON or had the wrong shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Too many requests from this IP, please try again after 24 hours")]
    QuotaExceeded,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingText | ApiError::TooManyWords | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            // operator side failure, never the caller's
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
