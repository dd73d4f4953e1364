//! DTOs for the share resolution endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShareOutcome;

/// Query string of `GET /api/share`.
///
/// The code is opaque: only presence and non-emptiness are checked.
#[derive(Debug, Deserialize, Validate)]
pub struct ShareQuery {
    #[validate(
        required(message = "Share code is required"),
        length(min = 1, message = "Share code is required")
    )]
    pub code: Option<String>,
}

/// Successful resolution body.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub success: bool,
    pub message: String,
    pub unlocked: bool,
}

impl From<ShareOutcome> for ShareResponse {
    fn from(outcome: ShareOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
            unlocked: outcome.unlocked,
        }
    }
}
