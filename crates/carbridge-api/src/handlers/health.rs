//! Health check and fallback handlers

use axum::http::Uri;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct PingResponse {
    pub success: bool,
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { success: true })
}

/// Any unmatched route or method
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound("Not Found".to_string())
}
