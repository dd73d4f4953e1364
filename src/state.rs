//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{ResumeService, ShareService};
use crate::domain::repositories::{ResumeRepository, ShareRepository};

/// Services available to every handler.
///
/// The store handles behind the services are chosen once at startup: the
/// PostgreSQL repositories, or [`crate::infrastructure::persistence::UnavailableStore`]
/// when no database is configured.
#[derive(Clone)]
pub struct AppState {
    pub share_service: Arc<ShareService<dyn ShareRepository, dyn ResumeRepository>>,
    pub resume_service: Arc<ResumeService<dyn ResumeRepository>>,
}

impl AppState {
    /// Wires services on top of the given store handles.
    pub fn new(
        share_repository: Arc<dyn ShareRepository>,
        resume_repository: Arc<dyn ResumeRepository>,
    ) -> Self {
        Self {
            share_service: Arc::new(ShareService::new(
                share_repository,
                resume_repository.clone(),
            )),
            resume_service: Arc::new(ResumeService::new(resume_repository)),
        }
    }
}
