//! Share link entity and the lookup view used when resolving a code.

use chrono::{DateTime, Utc};

use super::resume::ResumeCounters;

/// A share link handed out by a resume owner.
///
/// `code` is opaque and unique; it is the only lookup key the resolver uses.
#[derive(Debug, Clone)]
pub struct ShareLink {
    pub id: i64,
    pub resume_id: i64,
    pub code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    /// Creates a new ShareLink instance.
    pub fn new(
        id: i64,
        resume_id: i64,
        code: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resume_id,
            code,
            click_count,
            created_at,
        }
    }
}

/// Input data for creating a new share link.
#[derive(Debug, Clone)]
pub struct NewShareLink {
    pub resume_id: i64,
    pub code: String,
}

/// A share link joined with its parent resume's counters.
///
/// Produced by the code lookup; the counters reflect the moment of the read
/// and are never used to compute new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub link_id: i64,
    pub click_count: i64,
    pub resume_id: i64,
    pub resume_actual_clicks: i64,
    pub resume_required_clicks: i64,
    pub resume_export_unlocked: bool,
}

/// Result of counting one click against a link and its resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    /// Link counter after the increment.
    pub link_clicks: i64,
    /// Resume counters after the increment.
    pub resume: ResumeCounters,
}
