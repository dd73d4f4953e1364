//! PostgreSQL implementation of resume repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewResume, Resume};
use crate::domain::repositories::ResumeRepository;
use crate::error::AppError;

/// PostgreSQL repository for resumes.
pub struct PgResumeRepository {
    pool: Arc<PgPool>,
}

impl PgResumeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ResumeRow {
    id: i64,
    actual_clicks: i64,
    required_clicks: i64,
    export_unlocked: bool,
    created_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(r: ResumeRow) -> Self {
        Resume::new(
            r.id,
            r.actual_clicks,
            r.required_clicks,
            r.export_unlocked,
            r.created_at,
        )
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn create(&self, new_resume: NewResume) -> Result<Resume, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (required_clicks)
            VALUES ($1)
            RETURNING id, actual_clicks, required_clicks, export_unlocked, created_at
            "#,
        )
        .bind(new_resume.required_clicks)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, actual_clicks, required_clicks, export_unlocked, created_at
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Resume::from))
    }

    async fn list(&self, limit: i64) -> Result<Vec<Resume>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, actual_clicks, required_clicks, export_unlocked, created_at
            FROM resumes
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Resume::from).collect())
    }
}
