//! DTOs for resume status endpoint.

use serde::Serialize;

use crate::application::services::UnlockStatus;

/// Export gate status of a resume.
#[derive(Debug, Serialize)]
pub struct UnlockStatusResponse {
    pub resume_id: i64,
    pub actual_clicks: i64,
    pub required_clicks: i64,
    pub clicks_remaining: i64,
    pub export_unlocked: bool,
}

impl From<UnlockStatus> for UnlockStatusResponse {
    fn from(s: UnlockStatus) -> Self {
        Self {
            resume_id: s.resume_id,
            actual_clicks: s.actual_clicks,
            required_clicks: s.required_clicks,
            clicks_remaining: s.clicks_remaining,
            export_unlocked: s.export_unlocked,
        }
    }
}
