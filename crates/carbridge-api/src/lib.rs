//! carbridge-api - Stable vehicle REST API layer
//!
//! This crate provides the HTTP surface clients depend on. Handlers build an
//! upstream request, call through the injected `UpstreamBackend`, and run the
//! reply through the normalizer from `carbridge-core`. It is transport-agnostic:
//! tests plug in scripted backends, the daemon plugs in `UpstreamClient`.
//!
//! # Usage
//!
//! ```ignore
//! use carbridge_api::{create_router, AppState};
//! use carbridge_client::UpstreamClient;
//!
//! let client = UpstreamClient::vendor_default()?;
//! let state = AppState::new(Arc::new(client));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/ping", get(handlers::health::ping))
        // Vehicle routes
        .route("/vehicles/{id}", get(handlers::vehicles::get_vehicle))
        .route("/vehicles/{id}/doors", get(handlers::vehicles::get_doors))
        .route("/vehicles/{id}/fuel", get(handlers::vehicles::get_fuel))
        .route("/vehicles/{id}/battery", get(handlers::vehicles::get_battery))
        .route("/vehicles/{id}/engine", post(handlers::vehicles::engine_action))
        // Everything else keeps the {status, message} error shape,
        // including a known path hit with the wrong method
        .fallback(handlers::health::not_found)
        .method_not_allowed_fallback(handlers::health::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
