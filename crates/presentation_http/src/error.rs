//! API error handling
//!
//! Every error is rendered as a JSON object with an `error` field; the 404
//! payload adds a `message` listing the available endpoints.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Routes advertised in the 404 payload
pub const AVAILABLE_ENDPOINTS: &str = "Available endpoints: POST /speak, GET /status, GET /health";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Endpoint not found")]
    NotFound,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Additional hint for the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        match self {
            Self::BadRequest(msg) | Self::ServiceUnavailable(msg) | Self::Internal(msg) => {
                ErrorResponse {
                    error: msg,
                    message: None,
                }
            },
            Self::NotFound => ErrorResponse {
                error: "Endpoint not found".to_string(),
                message: Some(AVAILABLE_ENDPOINTS.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::NotReady => Self::ServiceUnavailable(err.to_string()),
            ApplicationError::Synthesis(_)
            | ApplicationError::MusicPlayer(_)
            | ApplicationError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<domain::DomainError> for ApiError {
    fn from(err: domain::DomainError) -> Self {
        ApplicationError::from(err).into()
    }
}
