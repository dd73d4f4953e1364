//! Share code resolution and share link creation.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{ExportGate, NewShareLink, ShareLink};
use crate::domain::repositories::{ResumeRepository, ShareRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Attempts at generating a collision-free share code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Outcome of a successful share code resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    /// Export state of the resume after this click.
    pub unlocked: bool,
    /// `true` only for the resolution that moved the gate to `Unlocked`.
    pub newly_unlocked: bool,
    pub message: String,
    pub link_clicks: i64,
    pub actual_clicks: i64,
    pub required_clicks: i64,
}

/// Service resolving share codes into clicks and unlocking exports.
///
/// Holds no state between calls; every decision is taken on the counters the
/// store returns from its own atomic increments.
pub struct ShareService<S, R>
where
    S: ShareRepository + ?Sized,
    R: ResumeRepository + ?Sized,
{
    share_repository: Arc<S>,
    resume_repository: Arc<R>,
}

impl<S, R> ShareService<S, R>
where
    S: ShareRepository + ?Sized,
    R: ResumeRepository + ?Sized,
{
    /// Creates a new share service.
    pub fn new(share_repository: Arc<S>, resume_repository: Arc<R>) -> Self {
        Self {
            share_repository,
            resume_repository,
        }
    }

    /// Resolves a share code, counting one click and unlocking export when the
    /// threshold is reached.
    ///
    /// # Flow
    ///
    /// 1. Reject an empty code before any store access
    /// 2. Look up the link and its resume; unknown codes change nothing
    /// 3. Increment the link and resume counters at the store
    /// 4. Evaluate the export gate on the post-increment counters
    /// 5. Persist the `Locked -> Unlocked` transition if it just happened
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `code` is empty.
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StoreUnavailable`] if any store call fails. Counter
    /// increments already applied are not undone.
    pub async fn resolve(&self, code: &str) -> Result<ShareOutcome, AppError> {
        let result = self.resolve_code(code).await;
        counter!("share_resolutions_total", "outcome" => outcome_label(&result)).increment(1);
        result
    }

    async fn resolve_code(&self, code: &str) -> Result<ShareOutcome, AppError> {
        if code.is_empty() {
            return Err(AppError::bad_request(
                "Share code is required",
                json!({ "parameter": "code" }),
            ));
        }

        let Some(target) = self.share_repository.find_by_code(code).await? else {
            debug!(code, "Unknown share code");
            return Err(AppError::not_found(
                "Invalid or expired share link",
                json!({ "code": code }),
            ));
        };

        let click = self.share_repository.record_click(&target).await?;
        let counters = click.resume;

        let before = ExportGate::from_flag(counters.export_unlocked);
        let after = before.evaluate(counters.actual_clicks, counters.required_clicks);

        // Several concurrent clicks may cross the threshold; only the one whose
        // write flips the stored flag counts as the unlock.
        let newly_unlocked = if after.is_unlocked() && !before.is_unlocked() {
            self.share_repository
                .set_export_unlocked(counters.resume_id)
                .await
                .map_err(|e| {
                    tracing::error!(
                        resume_id = counters.resume_id,
                        actual_clicks = counters.actual_clicks,
                        "Threshold reached but export flag update failed: {}",
                        e
                    );
                    e
                })?
        } else {
            false
        };

        if newly_unlocked {
            counter!("share_unlocks_total").increment(1);
            info!(
                resume_id = counters.resume_id,
                actual_clicks = counters.actual_clicks,
                required_clicks = counters.required_clicks,
                "Export unlocked"
            );
        }

        debug!(
            link_id = target.link_id,
            link_clicks = click.link_clicks,
            resume_id = counters.resume_id,
            actual_clicks = counters.actual_clicks,
            "Share click recorded"
        );

        Ok(ShareOutcome {
            unlocked: after.is_unlocked(),
            newly_unlocked,
            message: outcome_message(after, counters.actual_clicks, counters.required_clicks),
            link_clicks: click.link_clicks,
            actual_clicks: counters.actual_clicks,
            required_clicks: counters.required_clicks,
        })
    }

    /// Creates a share link for an existing resume.
    ///
    /// With `custom_code` the code is validated and must be free; otherwise a
    /// random 12-character code is generated, retrying on collisions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the resume does not exist.
    /// Returns [`AppError::Validation`] if the custom code is malformed.
    /// Returns [`AppError::Conflict`] if the custom code is taken.
    pub async fn create_share_link(
        &self,
        resume_id: i64,
        custom_code: Option<String>,
    ) -> Result<ShareLink, AppError> {
        self.ensure_resume_exists(resume_id).await?;

        if let Some(code) = custom_code {
            validate_custom_code(&code)?;

            return self
                .share_repository
                .create(NewShareLink { resume_id, code })
                .await;
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code()?;

            match self
                .share_repository
                .create(NewShareLink { resume_id, code })
                .await
            {
                Err(AppError::Conflict { .. }) => continue,
                result => return result,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique share code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Lists share links of an existing resume.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the resume does not exist.
    pub async fn list_share_links(&self, resume_id: i64) -> Result<Vec<ShareLink>, AppError> {
        self.ensure_resume_exists(resume_id).await?;
        self.share_repository.list_for_resume(resume_id).await
    }

    /// Reports whether the record store answers.
    pub async fn store_healthy(&self) -> bool {
        self.share_repository.health_check().await
    }

    async fn ensure_resume_exists(&self, resume_id: i64) -> Result<(), AppError> {
        match self.resume_repository.find_by_id(resume_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "Resume not found",
                json!({ "resume_id": resume_id }),
            )),
        }
    }
}

/// Label of `share_resolutions_total` for one resolution.
fn outcome_label(result: &Result<ShareOutcome, AppError>) -> &'static str {
    match result {
        Ok(o) if o.unlocked => "unlocked",
        Ok(_) => "locked",
        Err(AppError::Validation { .. }) => "invalid",
        Err(AppError::NotFound { .. }) => "not_found",
        Err(_) => "store_error",
    }
}

fn outcome_message(gate: ExportGate, actual_clicks: i64, required_clicks: i64) -> String {
    if gate.is_unlocked() {
        return "Export unlocked! Thanks for sharing.".to_string();
    }

    let remaining = (required_clicks - actual_clicks).max(1);
    format!(
        "Click recorded. {} more click{} needed to unlock export.",
        remaining,
        if remaining == 1 { "" } else { "s" }
    )
}
