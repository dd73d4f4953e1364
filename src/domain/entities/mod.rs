//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Resume`] - A resume with click counters and an export gate
//! - [`ShareLink`] - A share link pointing at a resume
//!
//! Creation inputs live next to their entity (`NewResume`, `NewShareLink`).
//! [`ShareTarget`], [`ResumeCounters`] and [`ClickRecord`] are read models
//! produced by the store during a share resolution.

pub mod resume;
pub mod share_link;

pub use resume::{DEFAULT_REQUIRED_CLICKS, ExportGate, NewResume, Resume, ResumeCounters};
pub use share_link::{ClickRecord, NewShareLink, ShareLink, ShareTarget};
