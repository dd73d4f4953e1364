#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use share_unlock::domain::entities::{
    NewResume, NewShareLink, Resume, ResumeCounters, ShareLink, ShareTarget,
};
use share_unlock::domain::repositories::{ResumeRepository, ShareRepository};
use share_unlock::error::AppError;
use share_unlock::state::AppState;

#[derive(Default)]
struct Inner {
    resumes: HashMap<i64, Resume>,
    links: HashMap<i64, ShareLink>,
    next_id: i64,
    unlock_transitions: usize,
    fail_resume_increment: bool,
    fail_unlock: bool,
    fail_lookup: bool,
    unlock_yields: usize,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory record store.
///
/// Every increment is applied under one lock, so concurrent callers observe
/// the same atomic `n = n + 1` semantics as the database.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_resume(&self, actual_clicks: i64, required_clicks: i64, unlocked: bool) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.resumes.insert(
            id,
            Resume::new(id, actual_clicks, required_clicks, unlocked, Utc::now()),
        );
        id
    }

    pub fn seed_link(&self, resume_id: i64, code: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.links.insert(
            id,
            ShareLink::new(id, resume_id, code.to_string(), 0, Utc::now()),
        );
        id
    }

    pub fn resume(&self, id: i64) -> Resume {
        self.inner.lock().unwrap().resumes[&id].clone()
    }

    pub fn link_clicks(&self, code: &str) -> i64 {
        self.inner
            .lock()
            .unwrap()
            .links
            .values()
            .find(|l| l.code == code)
            .map(|l| l.click_count)
            .unwrap()
    }

    /// Number of `false -> true` flips of any resume's export flag.
    pub fn unlock_transitions(&self) -> usize {
        self.inner.lock().unwrap().unlock_transitions
    }

    pub fn fail_resume_increment(&self, fail: bool) {
        self.inner.lock().unwrap().fail_resume_increment = fail;
    }

    pub fn fail_unlock(&self, fail: bool) {
        self.inner.lock().unwrap().fail_unlock = fail;
    }

    /// Makes every flag write yield to the scheduler `yields` times first,
    /// widening the window in which concurrent clicks cross the threshold.
    pub fn slow_unlock(&self, yields: usize) {
        self.inner.lock().unwrap().unlock_yields = yields;
    }

    pub fn fail_lookup(&self, fail: bool) {
        self.inner.lock().unwrap().fail_lookup = fail;
    }
}

fn store_down() -> AppError {
    AppError::store_unavailable("Injected store failure", json!({}))
}

#[async_trait]
impl ShareRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShareTarget>, AppError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_lookup {
            return Err(store_down());
        }

        Ok(inner.links.values().find(|l| l.code == code).map(|link| {
            let resume = &inner.resumes[&link.resume_id];
            ShareTarget {
                link_id: link.id,
                click_count: link.click_count,
                resume_id: resume.id,
                resume_actual_clicks: resume.actual_clicks,
                resume_required_clicks: resume.required_clicks,
                resume_export_unlocked: resume.export_unlocked,
            }
        }))
    }

    async fn increment_link_clicks(&self, link_id: i64) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let link = inner
            .links
            .get_mut(&link_id)
            .ok_or_else(|| AppError::not_found("Share link not found", json!({})))?;
        link.click_count += 1;
        Ok(link.click_count)
    }

    async fn increment_resume_clicks(&self, resume_id: i64) -> Result<ResumeCounters, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_resume_increment {
            return Err(store_down());
        }

        let resume = inner
            .resumes
            .get_mut(&resume_id)
            .ok_or_else(|| AppError::not_found("Resume not found", json!({})))?;
        resume.actual_clicks += 1;

        Ok(ResumeCounters {
            resume_id,
            actual_clicks: resume.actual_clicks,
            required_clicks: resume.required_clicks,
            export_unlocked: resume.export_unlocked,
        })
    }

    async fn set_export_unlocked(&self, resume_id: i64) -> Result<bool, AppError> {
        let yields = self.inner.lock().unwrap().unlock_yields;
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_unlock {
            return Err(store_down());
        }

        let resume = inner
            .resumes
            .get_mut(&resume_id)
            .ok_or_else(|| AppError::not_found("Resume not found", json!({})))?;
        let flipped = !resume.export_unlocked;
        resume.export_unlocked = true;
        if flipped {
            inner.unlock_transitions += 1;
        }
        Ok(flipped)
    }

    async fn create(&self, new_link: NewShareLink) -> Result<ShareLink, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.links.values().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict("Share code already exists", json!({})));
        }
        if !inner.resumes.contains_key(&new_link.resume_id) {
            return Err(AppError::not_found("Resume not found", json!({})));
        }

        let id = inner.next_id();
        let link = ShareLink::new(id, new_link.resume_id, new_link.code, 0, Utc::now());
        inner.links.insert(id, link.clone());
        Ok(link)
    }

    async fn list_for_resume(&self, resume_id: i64) -> Result<Vec<ShareLink>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut links: Vec<ShareLink> = inner
            .links
            .values()
            .filter(|l| l.resume_id == resume_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.id);
        Ok(links)
    }

    async fn health_check(&self) -> bool {
        !self.inner.lock().unwrap().fail_lookup
    }
}

#[async_trait]
impl ResumeRepository for MemoryStore {
    async fn create(&self, new_resume: NewResume) -> Result<Resume, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let resume = Resume::new(id, 0, new_resume.required_clicks, false, Utc::now());
        inner.resumes.insert(id, resume.clone());
        Ok(resume)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Resume>, AppError> {
        Ok(self.inner.lock().unwrap().resumes.get(&id).cloned())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Resume>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut resumes: Vec<Resume> = inner.resumes.values().cloned().collect();
        resumes.sort_by_key(|r| std::cmp::Reverse(r.id));
        resumes.truncate(limit as usize);
        Ok(resumes)
    }
}

pub fn create_test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(store.clone(), store)
}

pub async fn create_test_resume(
    pool: &PgPool,
    actual_clicks: i64,
    required_clicks: i64,
    export_unlocked: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO resumes (actual_clicks, required_clicks, export_unlocked) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(actual_clicks)
    .bind(required_clicks)
    .bind(export_unlocked)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_share_link(pool: &PgPool, resume_id: i64, code: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO share_links (resume_id, code) VALUES ($1, $2) RETURNING id")
        .bind(resume_id)
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
