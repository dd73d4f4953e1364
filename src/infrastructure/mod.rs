//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repositories and the unavailable-store fallback

pub mod persistence;
