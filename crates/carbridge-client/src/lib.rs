//! carbridge Upstream Client
//!
//! Typed HTTP client for the single vehicle vendor API that carbridge fronts.
//! Each call is one POST of `{id, responseType: "JSON"[, command]}` to a
//! named service under a fixed base address. No retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use carbridge_client::UpstreamClient;
//! use carbridge_core::{RemoteOperation, UpstreamRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UpstreamClient::vendor_default()?;
//!
//!     let request = UpstreamRequest::new(RemoteOperation::VehicleInfo, "1234");
//!     let reply = client.post(&request).await?;
//!     println!("{} {}", reply.status, reply.body);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a throwaway HTTP server and a fake vendor:
//!
//! ```rust,ignore
//! use carbridge_client::testing::{vendor, TestServer};
//!
//! let vendor = TestServer::start(vendor::router()).await?;
//! let reply = vendor.client.post(&request).await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::{UpstreamClient, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
pub use error::{Result, UpstreamClientError};
