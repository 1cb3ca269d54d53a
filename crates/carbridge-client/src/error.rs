//! Error types for upstream client construction

use thiserror::Error;

/// Result type alias for upstream client operations
pub type Result<T> = std::result::Result<T, UpstreamClientError>;

/// Errors that can occur while building an [`UpstreamClient`](crate::UpstreamClient)
///
/// Per-request failures are not reported here; they travel to the normalizer
/// as a [`TransportError`](carbridge_core::TransportError).
#[derive(Error, Debug)]
pub enum UpstreamClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Base URL cannot carry service path segments (e.g. `mailto:`)
    #[error("Base URL cannot be a base: {0}")]
    NotABase(String),

    /// IO error (test server binding)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
