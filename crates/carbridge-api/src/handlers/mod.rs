//! HTTP request handlers for the vehicle API
//!
//! These handlers call through the UpstreamBackend trait and are
//! transport-agnostic.

pub mod health;
pub mod vehicles;
