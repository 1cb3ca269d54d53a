//! Error payload model

use serde::{Deserialize, Serialize};

/// Uniform error body: exactly `{status, message}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// HTTP status code, mirrored from the response status line
    pub status: u16,
    /// Human-readable message
    pub message: String,
}
