//! Client-facing payload models
//!
//! These are the only shapes that ever leave the adapter. None of them carry
//! the vendor's `type`/`value` wrappers or its raw `status`/`reason`.

mod energy;
mod engine;
mod error;
mod vehicle;

pub use energy::*;
pub use engine::*;
pub use error::*;
pub use vehicle::*;
