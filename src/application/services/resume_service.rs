//! Resume creation and export status.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{DEFAULT_REQUIRED_CLICKS, NewResume, Resume};
use crate::domain::repositories::ResumeRepository;
use crate::error::AppError;

const MAX_LIST_LIMIT: i64 = 1000;

/// Read-only snapshot of a resume's export gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockStatus {
    pub resume_id: i64,
    pub actual_clicks: i64,
    pub required_clicks: i64,
    pub clicks_remaining: i64,
    pub export_unlocked: bool,
}

impl From<&Resume> for UnlockStatus {
    fn from(resume: &Resume) -> Self {
        Self {
            resume_id: resume.id,
            actual_clicks: resume.actual_clicks,
            required_clicks: resume.required_clicks,
            clicks_remaining: resume.clicks_remaining(),
            export_unlocked: resume.export_unlocked,
        }
    }
}

/// Service for creating resumes and reading their unlock status.
pub struct ResumeService<R: ResumeRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ResumeRepository + ?Sized> ResumeService<R> {
    /// Creates a new resume service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a resume in the `Locked` state.
    ///
    /// Uses [`DEFAULT_REQUIRED_CLICKS`] when no threshold is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `required_clicks` is not positive.
    pub async fn create_resume(&self, required_clicks: Option<i64>) -> Result<Resume, AppError> {
        let required_clicks = required_clicks.unwrap_or(DEFAULT_REQUIRED_CLICKS);

        if required_clicks <= 0 {
            return Err(AppError::bad_request(
                "Required clicks must be greater than 0",
                json!({ "required_clicks": required_clicks }),
            ));
        }

        self.repository.create(NewResume { required_clicks }).await
    }

    /// Retrieves a resume by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no resume has this id.
    pub async fn get_resume(&self, id: i64) -> Result<Resume, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resume not found", json!({ "resume_id": id })))
    }

    /// Lists the most recent resumes, capped at 1000.
    pub async fn list_resumes(&self, limit: i64) -> Result<Vec<Resume>, AppError> {
        self.repository.list(limit.clamp(1, MAX_LIST_LIMIT)).await
    }

    /// Reads the export gate of a resume without touching its counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no resume has this id.
    pub async fn unlock_status(&self, id: i64) -> Result<UnlockStatus, AppError> {
        let resume = self.get_resume(id).await?;
        Ok(UnlockStatus::from(&resume))
    }
}
