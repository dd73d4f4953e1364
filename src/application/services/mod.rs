//! Business logic services for the application layer.

pub mod resume_service;
pub mod share_service;

pub use resume_service::{ResumeService, UnlockStatus};
pub use share_service::{ShareOutcome, ShareService};
