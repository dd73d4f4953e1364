//! HTTP request handlers for API endpoints.

pub mod health;
pub mod resume_status;
pub mod share;

pub use health::health_handler;
pub use resume_status::unlock_status_handler;
pub use share::share_handler;
