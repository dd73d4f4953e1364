//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Share code generation and validation

pub mod code_generator;
