//! Configuration management for the LDAP JWT service
//!
//! This crate handles parsing, defaulting and validation of the YAML
//! configuration, including resolution of credentials stored as files in a
//! secrets directory.

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::ConfigLoader;
pub use schema::*;
pub use secret::SecretValue;
pub use validation::*;
