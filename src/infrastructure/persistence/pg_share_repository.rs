//! PostgreSQL implementation of share repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ClickRecord, NewShareLink, ResumeCounters, ShareLink, ShareTarget};
use crate::domain::repositories::ShareRepository;
use crate::error::AppError;

const INCREMENT_LINK_SQL: &str =
    "UPDATE share_links SET click_count = click_count + 1 WHERE id = $1 RETURNING click_count";

const INCREMENT_RESUME_SQL: &str = "UPDATE resumes SET actual_clicks = actual_clicks + 1 \
     WHERE id = $1 RETURNING id, actual_clicks, required_clicks, export_unlocked";

/// PostgreSQL repository for share links and click counters.
///
/// Counter updates are single `UPDATE ... SET n = n + 1 RETURNING` statements,
/// so concurrent clicks on the same resume never lose an increment.
pub struct PgShareRepository {
    pool: Arc<PgPool>,
}

impl PgShareRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ShareTargetRow {
    link_id: i64,
    click_count: i64,
    resume_id: i64,
    actual_clicks: i64,
    required_clicks: i64,
    export_unlocked: bool,
}

impl From<ShareTargetRow> for ShareTarget {
    fn from(r: ShareTargetRow) -> Self {
        ShareTarget {
            link_id: r.link_id,
            click_count: r.click_count,
            resume_id: r.resume_id,
            resume_actual_clicks: r.actual_clicks,
            resume_required_clicks: r.required_clicks,
            resume_export_unlocked: r.export_unlocked,
        }
    }
}

#[derive(FromRow)]
struct ResumeCountersRow {
    id: i64,
    actual_clicks: i64,
    required_clicks: i64,
    export_unlocked: bool,
}

impl From<ResumeCountersRow> for ResumeCounters {
    fn from(r: ResumeCountersRow) -> Self {
        ResumeCounters {
            resume_id: r.id,
            actual_clicks: r.actual_clicks,
            required_clicks: r.required_clicks,
            export_unlocked: r.export_unlocked,
        }
    }
}

#[derive(FromRow)]
struct ShareLinkRow {
    id: i64,
    resume_id: i64,
    code: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<ShareLinkRow> for ShareLink {
    fn from(r: ShareLinkRow) -> Self {
        ShareLink::new(r.id, r.resume_id, r.code, r.click_count, r.created_at)
    }
}

#[async_trait]
impl ShareRepository for PgShareRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShareTarget>, AppError> {
        let row = sqlx::query_as::<_, ShareTargetRow>(
            r#"
            SELECT
                sl.id AS link_id,
                sl.click_count,
                sl.resume_id,
                r.actual_clicks,
                r.required_clicks,
                r.export_unlocked
            FROM share_links sl
            JOIN resumes r ON r.id = sl.resume_id
            WHERE sl.code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShareTarget::from))
    }

    async fn increment_link_clicks(&self, link_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(INCREMENT_LINK_SQL)
            .bind(link_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found", json!({ "link_id": link_id })))
    }

    async fn increment_resume_clicks(&self, resume_id: i64) -> Result<ResumeCounters, AppError> {
        sqlx::query_as::<_, ResumeCountersRow>(INCREMENT_RESUME_SQL)
            .bind(resume_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(ResumeCounters::from)
            .ok_or_else(|| AppError::not_found("Resume not found", json!({ "resume_id": resume_id })))
    }

    async fn set_export_unlocked(&self, resume_id: i64) -> Result<bool, AppError> {
        let flipped = sqlx::query_scalar::<_, i64>(
            "UPDATE resumes SET export_unlocked = TRUE \
             WHERE id = $1 AND NOT export_unlocked RETURNING id",
        )
        .bind(resume_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(flipped.is_some())
    }

    /// Applies both increments in one transaction.
    async fn record_click(&self, target: &ShareTarget) -> Result<ClickRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let link_clicks = sqlx::query_scalar::<_, i64>(INCREMENT_LINK_SQL)
            .bind(target.link_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(link_clicks) = link_clicks else {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Invalid or expired share link",
                json!({ "link_id": target.link_id }),
            ));
        };

        let resume = sqlx::query_as::<_, ResumeCountersRow>(INCREMENT_RESUME_SQL)
            .bind(target.resume_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(resume) = resume else {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Resume not found",
                json!({ "resume_id": target.resume_id }),
            ));
        };

        tx.commit().await?;

        Ok(ClickRecord {
            link_clicks,
            resume: resume.into(),
        })
    }

    async fn create(&self, new_link: NewShareLink) -> Result<ShareLink, AppError> {
        let row = sqlx::query_as::<_, ShareLinkRow>(
            r#"
            INSERT INTO share_links (resume_id, code)
            VALUES ($1, $2)
            RETURNING id, resume_id, code, click_count, created_at
            "#,
        )
        .bind(new_link.resume_id)
        .bind(&new_link.code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_for_resume(&self, resume_id: i64) -> Result<Vec<ShareLink>, AppError> {
        let rows = sqlx::query_as::<_, ShareLinkRow>(
            r#"
            SELECT id, resume_id, code, click_count, created_at
            FROM share_links
            WHERE resume_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(resume_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShareLink::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
