//! Handler for resume unlock status.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::resume::UnlockStatusResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the export gate status of a resume.
///
/// # Endpoint
///
/// `GET /api/resumes/{id}/unlock-status`
///
/// Read-only: counters are never modified here.
///
/// # Errors
///
/// Returns 404 Not Found if the resume doesn't exist.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn unlock_status_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UnlockStatusResponse>, AppError> {
    let status = state.resume_service.unlock_status(id).await?;
    Ok(Json(status.into()))
}
