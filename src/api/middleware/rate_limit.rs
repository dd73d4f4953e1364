//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters for one group of routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Seconds after which one request of the quota is replenished.
    pub replenish_secs: u64,
    /// Requests allowed in a burst.
    pub burst_size: u32,
    /// Key on `X-Forwarded-For` / `X-Real-IP` instead of the peer address.
    pub behind_proxy: bool,
}

/// Wraps `router` with a per-client-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// With `behind_proxy` the client IP is read from proxy headers, falling back
/// to the socket peer address. Enable only behind a trusted reverse proxy.
///
/// # Errors
///
/// Returns an error if `replenish_secs` or `burst_size` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api_routes(), limits)?;
/// ```
pub fn apply<S>(router: Router<S>, limits: RateLimit) -> Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    if limits.behind_proxy {
        Ok(router.layer(layer(limits, SmartIpKeyExtractor)?))
    } else {
        Ok(router.layer(layer(limits, PeerIpKeyExtractor)?))
    }
}

/// Builds the governor layer for one key extractor.
///
/// # Errors
///
/// Returns an error if `replenish_secs` or `burst_size` is zero.
pub fn layer<K>(
    limits: RateLimit,
    key_extractor: K,
) -> Result<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, Body>>
where
    K: KeyExtractor,
{
    let config = GovernorConfigBuilder::default()
        .per_second(limits.replenish_secs)
        .burst_size(limits.burst_size)
        .key_extractor(key_extractor)
        .finish()
        .context("Rate limit interval and burst size must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(config)))
}
