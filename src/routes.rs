//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check: record store (public)
//! - `/api/*`      - Share resolution and status (public, rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser access from the resume UI
//! - **Rate limiting** - Per-IP token bucket on `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router-level settings taken from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub rate_limit: RateLimit,
    pub cors_allowed_origins: Vec<String>,
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit or CORS settings are invalid.
pub fn app_router(state: AppState, options: &RouterOptions) -> Result<NormalizePath<Router>> {
    let api_router = rate_limit::apply(api::routes::public_routes(), options.rate_limit)?;

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors::layer(&options.cors_allowed_origins)?)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
