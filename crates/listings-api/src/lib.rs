//! # Property Listings API
//!
//! HTTP API service for the property listings cache service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │          (page-cache middleware + JSON handlers)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ApiContext                            │
//! │      (PropertyStore, metrics source, page cache)            │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │        PostgreSQL            │
//! │ (listing + page entries)│   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod page_cache;

use axum::Router;
use axum::http::Method;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use context::ApiContext;

/// Build the Axum router
pub fn build_router(ctx: ApiContext) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    // Only the listing endpoint sits behind the whole-response cache
    let cached = Router::new()
        .route("/properties", get(handlers::property_list))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            page_cache::page_cache,
        ));

    Router::new()
        .merge(cached)
        .route("/metrics/cache", get(handlers::cache_metrics))
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/", get(|| async { "Property Listings API" }))
        // State and middleware
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
