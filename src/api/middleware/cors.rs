//! CORS middleware for the browser UI.

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS layer from the configured origins.
///
/// An empty list allows any origin; the share endpoint is public and is
/// called from pages served on arbitrary hosts.
///
/// # Errors
///
/// Returns an error if an origin is not a valid header value.
pub fn layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{}'", o))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS]))
}
