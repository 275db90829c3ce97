//! Shared types for the LDAP JWT configuration loader
//!
//! This crate contains the error types and small helpers shared between the
//! configuration crate and the checker binary.

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, Result, ValidationError};
