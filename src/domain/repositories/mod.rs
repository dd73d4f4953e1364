//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract of the record store; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShareRepository`] - Share link lookup and click counting
//! - [`ResumeRepository`] - Resume creation and reads

pub mod resume_repository;
pub mod share_repository;

pub use resume_repository::ResumeRepository;
pub use share_repository::ShareRepository;

#[cfg(test)]
pub use resume_repository::MockResumeRepository;
#[cfg(test)]
pub use share_repository::MockShareRepository;
