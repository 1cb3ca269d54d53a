//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use carbridge_core::{NormalizeError, NormalizedError};

/// API error type that converts to HTTP responses
///
/// Every variant renders as `{status, message}` with `status` equal to the
/// HTTP status line.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// Status relayed from the vendor's domain status
    Upstream { status: StatusCode, message: String },
    /// 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    fn into_parts(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream { status, message } => (status, message),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.into_parts();

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), %message, "API client error");
        }

        let body = Json(NormalizedError {
            status: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        let message = err.message();
        match err {
            NormalizeError::InvalidEngineAction(_) => ApiError::BadRequest(message),
            NormalizeError::Upstream { .. } => {
                match StatusCode::from_u16(err.status_code()) {
                    Ok(status) => ApiError::Upstream { status, message },
                    Err(_) => ApiError::Internal(message),
                }
            }
            NormalizeError::Transport(_)
            | NormalizeError::TransportStatus(_)
            | NormalizeError::MalformedResponse(_)
            | NormalizeError::ServiceNotFound => ApiError::Internal(message),
        }
    }
}
