//! API route configuration.

use crate::api::handlers::{share_handler, unlock_status_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /share?code=<code>`             - Resolve a share code (counts a click)
/// - `GET /resumes/{id}/unlock-status`    - Export gate status of a resume
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/share", get(share_handler))
        .route("/resumes/{id}/unlock-status", get(unlock_status_handler))
}
