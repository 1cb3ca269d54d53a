//! Classified failures produced while normalizing an upstream reply

use thiserror::Error;

use crate::models::NormalizedError;

/// Message returned when the transport failed or the reply cannot be trusted
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Message returned when the vendor reports a routing defect on our side
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error occurred";

/// Result type for normalization operations
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Every way a request can fail before a normalized payload is produced
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The outbound call never produced a reply (connect failure, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The vendor answered with a non-200 HTTP status
    #[error("Upstream returned HTTP {0}")]
    TransportStatus(u16),

    /// The reply body did not have the shape the capability needs
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The vendor did not recognise the remote operation we asked for
    #[error("Upstream service not found")]
    ServiceNotFound,

    /// The vendor reported a domain failure in the body
    #[error("Upstream domain error {status}: {reason:?}")]
    Upstream {
        /// Domain status taken from the body
        status: i64,
        /// Vendor-supplied reason, if any
        reason: Option<String>,
    },

    /// Engine request body carried something other than START or STOP
    #[error("Engine can only START or STOP. {0} is invalid")]
    InvalidEngineAction(String),
}

impl NormalizeError {
    /// Returns the HTTP status code the client sees for this error
    pub fn status_code(&self) -> u16 {
        match self {
            NormalizeError::Transport(_) => 500,
            NormalizeError::TransportStatus(_) => 500,
            NormalizeError::MalformedResponse(_) => 500,
            NormalizeError::ServiceNotFound => 500,
            // 1xx, 204, 205 and 304 responses cannot carry the error body
            NormalizeError::Upstream { status, .. } => match u16::try_from(*status) {
                Ok(code) if (200..=599).contains(&code) && !matches!(code, 204 | 205 | 304) => {
                    code
                }
                _ => 500,
            },
            NormalizeError::InvalidEngineAction(_) => 400,
        }
    }

    /// Returns the client-facing message for this error
    ///
    /// Transport and shape failures never relay upstream detail.
    pub fn message(&self) -> String {
        match self {
            NormalizeError::Transport(_)
            | NormalizeError::TransportStatus(_)
            | NormalizeError::MalformedResponse(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
            NormalizeError::ServiceNotFound => INTERNAL_ERROR_MESSAGE.to_string(),
            NormalizeError::Upstream { reason, .. } => reason
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            NormalizeError::InvalidEngineAction(_) => self.to_string(),
        }
    }

    /// Build the `{status, message}` payload for this error
    pub fn to_normalized(&self) -> NormalizedError {
        NormalizedError {
            status: self.status_code(),
            message: self.message(),
        }
    }
}
