//! Shared utilities
//!
//! Error handling and input validation.

pub mod errors;
pub mod validation;
