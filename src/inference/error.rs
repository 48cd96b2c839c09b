//! Errors surfaced by the inference contract and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures that reach the caller.
///
/// Per-resource problems never show up here; those records are dropped
/// during ranking.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Declared content type is not JSON (415)
    #[error("Unsupported content type: {0}")]
    UnsupportedMediaType(String),

    /// Body is not JSON or lacks `incident` / `resources` (400)
    #[error("Malformed request: {message}")]
    MalformedRequest {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Response could not be serialized (500)
    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl InferenceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::MalformedRequest { .. } => "MALFORMED_REQUEST",
            Self::Encode(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl IntoResponse for InferenceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
