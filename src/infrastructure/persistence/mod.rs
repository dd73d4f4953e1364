//! Record store implementations.
//!
//! Concrete implementations of domain repository traits. PostgreSQL access
//! goes through SQLx runtime-checked queries mapped with `FromRow`.
//!
//! # Repositories
//!
//! - [`PgShareRepository`] - Share link lookup and click counting
//! - [`PgResumeRepository`] - Resume creation and reads
//! - [`UnavailableStore`] - Installed when no database is configured

pub mod pg_resume_repository;
pub mod pg_share_repository;
pub mod unavailable_store;

pub use pg_resume_repository::PgResumeRepository;
pub use pg_share_repository::PgShareRepository;
pub use unavailable_store::UnavailableStore;
