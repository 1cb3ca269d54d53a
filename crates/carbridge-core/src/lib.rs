//! carbridge-core - Core types and response normalization for carbridge
//!
//! This crate holds everything that does not touch the network: the
//! client-facing payload models, the loosely typed upstream envelope, the
//! `UpstreamBackend` seam the HTTP layer calls through, and the pure
//! normalizer that turns an upstream reply into either a typed payload or a
//! classified error.
//!
//! # Usage
//!
//! ```ignore
//! use carbridge_core::normalize::{extract, normalize};
//! use carbridge_core::{RemoteOperation, UpstreamRequest};
//!
//! let request = UpstreamRequest::new(RemoteOperation::VehicleInfo, "1234");
//! let outcome = backend.call(&request).await;
//! let info = normalize(outcome, extract::vehicle_info)?;
//! ```

pub mod backend;
pub mod error;
pub mod models;
pub mod normalize;
pub mod upstream;

pub use backend::UpstreamBackend;
pub use error::{NormalizeError, NormalizeResult};
pub use models::*;
pub use upstream::{
    RemoteOperation, TransportError, TransportResult, UpstreamEnvelope, UpstreamReply,
    UpstreamRequest, WrappedField,
};
