//! Error types for the LDAP JWT configuration loader

use std::path::PathBuf;
use thiserror::Error;

/// Main error type returned when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Unable to read config: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is malformed or does not match the expected shape
    #[error("Unable to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A semantic constraint was violated
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Semantic validation failures, one per violated rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The server list is empty
    #[error("no servers")]
    NoServers,

    /// A server entry has a blank host
    #[error("missing host")]
    MissingHost,

    /// Group checks are enabled but no bind user name was given
    #[error("missing user name")]
    MissingUserName,

    /// Group checks are enabled but no bind password was given
    #[error("missing password")]
    MissingPassword,

    /// A value referenced a secret file that could not be read
    #[error("cannot resolve secret: {}", path.display())]
    UnresolvedSecret { path: PathBuf },

    /// A group definition is blank
    #[error("invalid group definition")]
    InvalidGroupDefinition,

    /// Group checks are enabled but no signing key was given
    #[error("missing signing key")]
    MissingSigningKey,
}

impl ConfigError {
    /// Returns the validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ConfigError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
