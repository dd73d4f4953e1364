//! Record store stand-in used when no database is configured.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::entities::{
    NewResume, NewShareLink, Resume, ResumeCounters, ShareLink, ShareTarget,
};
use crate::domain::repositories::{ResumeRepository, ShareRepository};
use crate::error::AppError;

/// A store that fails every operation with [`AppError::StoreUnavailable`].
///
/// Installed once at startup when the database configuration is absent, so
/// the service still boots and answers `/health` while share resolution
/// reports a server error.
pub struct UnavailableStore;

impl UnavailableStore {
    /// Creates a new UnavailableStore instance.
    pub fn new() -> Self {
        debug!("Using UnavailableStore (no database configured)");
        Self
    }

    fn error(operation: &'static str) -> AppError {
        AppError::store_unavailable(
            "Record store is not configured",
            json!({ "operation": operation }),
        )
    }

    fn error_with(operation: &'static str, details: Value) -> AppError {
        AppError::store_unavailable(
            "Record store is not configured",
            json!({ "operation": operation, "input": details }),
        )
    }
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareRepository for UnavailableStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShareTarget>, AppError> {
        Err(Self::error_with("find_by_code", json!({ "code": code })))
    }

    async fn increment_link_clicks(&self, link_id: i64) -> Result<i64, AppError> {
        Err(Self::error_with("increment_link_clicks", json!({ "link_id": link_id })))
    }

    async fn increment_resume_clicks(&self, resume_id: i64) -> Result<ResumeCounters, AppError> {
        Err(Self::error_with("increment_resume_clicks", json!({ "resume_id": resume_id })))
    }

    async fn set_export_unlocked(&self, resume_id: i64) -> Result<bool, AppError> {
        Err(Self::error_with("set_export_unlocked", json!({ "resume_id": resume_id })))
    }

    async fn create(&self, _new_link: NewShareLink) -> Result<ShareLink, AppError> {
        Err(Self::error("create_share_link"))
    }

    async fn list_for_resume(&self, _resume_id: i64) -> Result<Vec<ShareLink>, AppError> {
        Err(Self::error("list_share_links"))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[async_trait]
impl ResumeRepository for UnavailableStore {
    async fn create(&self, _new_resume: NewResume) -> Result<Resume, AppError> {
        Err(Self::error("create_resume"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Resume>, AppError> {
        Err(Self::error_with("find_resume", json!({ "id": id })))
    }

    async fn list(&self, _limit: i64) -> Result<Vec<Resume>, AppError> {
        Err(Self::error("list_resumes"))
    }
}
