//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Resumes, share links and the export gate
//! - [`repositories`] - Record store trait definitions
//!
//! The domain layer has no dependency on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
