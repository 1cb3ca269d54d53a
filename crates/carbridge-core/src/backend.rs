//! UpstreamBackend trait - the seam between the HTTP layer and the vendor

use async_trait::async_trait;

use crate::upstream::{TransportResult, UpstreamRequest};

/// Something that can carry one request to the vendor and hand back the raw
/// reply.
///
/// Implementations perform exactly one outbound call per invocation and never
/// retry. They report failures as a [`TransportError`](crate::TransportError)
/// rather than interpreting the reply; classification is the normalizer's job.
///
/// A single instance is constructed at startup and shared by all requests.
#[async_trait]
pub trait UpstreamBackend: Send + Sync {
    /// Issue `request` against its remote operation
    async fn call(&self, request: &UpstreamRequest) -> TransportResult;
}
