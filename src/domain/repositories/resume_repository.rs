//! Repository trait for resumes.

use crate::domain::entities::{NewResume, Resume};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reading and creating resumes.
///
/// Counter mutations are not part of this trait; they belong to
/// [`super::ShareRepository`] so that a resolution touches a single store
/// handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Creates a resume in the `Locked` state with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn create(&self, new_resume: NewResume) -> Result<Resume, AppError>;

    /// Finds a resume by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Resume>, AppError>;

    /// Lists the most recently created resumes.
    async fn list(&self, limit: i64) -> Result<Vec<Resume>, AppError>;
}
