//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::share_service::ShareService`] - Share code resolution and share link creation
//! - [`services::resume_service::ResumeService`] - Resume creation and unlock status

pub mod services;
