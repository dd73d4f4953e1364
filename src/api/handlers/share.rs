//! Handler for share code resolution.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::share::{ShareQuery, ShareResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Counts a click on a share link and reports whether export is unlocked.
///
/// # Endpoint
///
/// `GET /api/share?code=<code>`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Export unlocked! Thanks for sharing.",
///   "unlocked": true
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: `code` is missing or empty (store not touched)
/// - **404 Not Found**: no share link has this code
/// - **503 Service Unavailable**: the record store failed
///
/// Error bodies are `{ "error": "<message>" }`.
pub async fn share_handler(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Result<Json<ShareResponse>, AppError> {
    query.validate()?;

    let code = query.code.unwrap_or_default();
    let outcome = state.share_service.resolve(&code).await?;

    Ok(Json(outcome.into()))
}
