//! Upstream vendor HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use carbridge_core::{
    TransportError, TransportResult, UpstreamBackend, UpstreamReply, UpstreamRequest,
};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, UpstreamClientError};

/// Fixed address of the vendor API
pub const DEFAULT_BASE_URL: &str = "http://gmapi.azurewebsites.net/";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the upstream vendor API
///
/// Cheap to clone; clones share the underlying connection pool. Construct one
/// at startup and hand it to the HTTP layer.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a client for the vendor's fixed address
    pub fn vendor_default() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Create a new upstream client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the vendor API (e.g., "http://gmapi.azurewebsites.net/")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new upstream client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = normalize_base_url(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the remote operation carried by `request`
    pub fn service_url(&self, request: &UpstreamRequest) -> Result<Url> {
        Ok(self.base_url.join(request.operation.service_name())?)
    }

    /// POST `request` to its remote operation and return the raw reply.
    ///
    /// The body is read as text whatever the status; nothing is interpreted
    /// here.
    #[instrument(skip(self, request), fields(operation = %request.operation, vehicle_id = %request.id))]
    pub async fn post(&self, request: &UpstreamRequest) -> TransportResult {
        let url = self
            .service_url(request)
            .map_err(|e| TransportError::Other(e.to_string()))?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, bytes = body.len(), "Upstream replied");
        Ok(UpstreamReply { status, body })
    }
}

#[async_trait]
impl UpstreamBackend for UpstreamClient {
    async fn call(&self, request: &UpstreamRequest) -> TransportResult {
        self.post(request).await
    }
}

/// Parse `base_url` and make sure service names join under it rather than
/// replacing its last path segment.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(UpstreamClientError::NotABase(base_url.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
