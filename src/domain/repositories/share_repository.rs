//! Repository trait for share links and click counting.

use crate::domain::entities::{ClickRecord, NewShareLink, ResumeCounters, ShareLink, ShareTarget};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;

/// Record store interface used by the share resolver.
///
/// All counter mutations must be atomic at the store (`n = n + 1` evaluated
/// by the store itself), never computed by the caller from a previous read.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShareRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::UnavailableStore`] - Store not configured
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareRepository: Send + Sync {
    /// Looks up a share link by exact code, joined with its parent resume.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShareTarget))` if the code exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShareTarget>, AppError>;

    /// Atomically increments a link's `click_count` and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link no longer exists.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn increment_link_clicks(&self, link_id: i64) -> Result<i64, AppError>;

    /// Atomically increments a resume's `actual_clicks`.
    ///
    /// Returns the counters as they are right after the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the resume no longer exists.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn increment_resume_clicks(&self, resume_id: i64) -> Result<ResumeCounters, AppError>;

    /// Sets `export_unlocked = true` if it is still false.
    ///
    /// Returns `true` only for the call that flipped the flag; concurrent
    /// callers racing on the same resume see `false`. Setting it twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn set_export_unlocked(&self, resume_id: i64) -> Result<bool, AppError>;

    /// Counts one click against a link and its parent resume.
    ///
    /// The default implementation issues the two increments one after the
    /// other. If the resume increment fails after the link increment
    /// succeeded, the link keeps its extra click; the failure is logged and
    /// returned, nothing is rolled back. Stores that support transactions
    /// override this to apply both writes atomically.
    ///
    /// # Errors
    ///
    /// Propagates errors from either increment.
    async fn record_click(&self, target: &ShareTarget) -> Result<ClickRecord, AppError> {
        let link_clicks = self.increment_link_clicks(target.link_id).await?;

        let resume = self
            .increment_resume_clicks(target.resume_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    link_id = target.link_id,
                    resume_id = target.resume_id,
                    "Share link click counted but resume counter update failed: {}",
                    e
                );
                e
            })?;

        if resume.resume_id != target.resume_id {
            return Err(AppError::internal(
                "Store returned counters for a different resume",
                json!({ "expected": target.resume_id, "actual": resume.resume_id }),
            ));
        }

        Ok(ClickRecord {
            link_clicks,
            resume,
        })
    }

    /// Creates a new share link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::NotFound`] if the resume does not exist.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn create(&self, new_link: NewShareLink) -> Result<ShareLink, AppError>;

    /// Lists all share links of a resume, oldest first.
    async fn list_for_resume(&self, resume_id: i64) -> Result<Vec<ShareLink>, AppError>;

    /// Returns `true` if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}
