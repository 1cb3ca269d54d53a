//! Application state for the vehicle API

use std::sync::Arc;

use carbridge_core::UpstreamBackend;

/// Application state shared across all handlers
///
/// Holds the one upstream backend for the process. Cloning the state clones
/// the `Arc`, so every request reuses the same connection pool.
#[derive(Clone)]
pub struct AppState {
    upstream: Arc<dyn UpstreamBackend>,
}

impl AppState {
    /// Create a new AppState around the given upstream backend
    pub fn new(upstream: Arc<dyn UpstreamBackend>) -> Self {
        Self { upstream }
    }

    /// Get the upstream backend
    pub fn upstream(&self) -> &Arc<dyn UpstreamBackend> {
        &self.upstream
    }
}
