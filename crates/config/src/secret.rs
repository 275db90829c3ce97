//! Credentials that may live in files under a secrets directory
//!
//! A credential field holds either the credential itself or the path of a
//! file containing it. Any value that contains the secrets directory is a
//! file reference; everything else is taken literally.

use crate::defaults::DEFAULT_SECRETS_DIR;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use types::{utils::is_blank, ValidationError};

/// A credential value, classified by where its content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    /// The value is the credential
    Literal(String),
    /// The credential is the content of this file
    File(PathBuf),
}

impl SecretValue {
    /// Classify a raw configuration value against the secrets directory
    ///
    /// Matching is a substring check, so a value names a file whenever the
    /// directory appears anywhere in it.
    pub fn classify(value: &str, secrets_dir: &str) -> Self {
        if !secrets_dir.is_empty() && value.contains(secrets_dir) {
            SecretValue::File(PathBuf::from(value))
        } else {
            SecretValue::Literal(value.to_string())
        }
    }

    /// Whether the value references a file
    pub fn is_file(&self) -> bool {
        matches!(self, SecretValue::File(_))
    }

    /// Produce the final credential, reading the file if there is one
    ///
    /// File content is used verbatim, trailing newlines included.
    pub fn resolve(self) -> Result<String, ValidationError> {
        match self {
            SecretValue::Literal(value) => Ok(value),
            SecretValue::File(path) => read_secret(&path),
        }
    }
}

/// Classify and resolve a value in one step
pub fn resolve_secret(value: &str, secrets_dir: &str) -> Result<String, ValidationError> {
    SecretValue::classify(value, secrets_dir).resolve()
}

/// The secrets directory to use, falling back to the default when blank
pub fn normalize_secrets_dir(secrets_dir: &str) -> &str {
    if is_blank(secrets_dir) {
        DEFAULT_SECRETS_DIR
    } else {
        secrets_dir
    }
}

fn read_secret(path: &Path) -> Result<String, ValidationError> {
    debug!(path = %path.display(), "reading secret");
    std::fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to read secret");
        ValidationError::UnresolvedSecret {
            path: path.to_path_buf(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify() {
        assert_eq!(
            SecretValue::classify("/run/secrets/bind_pw", "/run/secrets/"),
            SecretValue::File(PathBuf::from("/run/secrets/bind_pw"))
        );
        assert_eq!(
            SecretValue::classify("hunter2", "/run/secrets/"),
            SecretValue::Literal("hunter2".to_string())
        );
        // Substring, not prefix
        assert!(SecretValue::classify("/mnt/run/secrets/key", "/run/secrets/").is_file());
        assert!(!SecretValue::classify("anything", "").is_file());
    }

    #[test]
    fn test_normalize_secrets_dir() {
        assert_eq!(normalize_secrets_dir(""), DEFAULT_SECRETS_DIR);
        assert_eq!(normalize_secrets_dir("   "), DEFAULT_SECRETS_DIR);
        assert_eq!(normalize_secrets_dir("/var/secrets/"), "/var/secrets/");
    }

    #[test]
    fn test_resolve_reads_file_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signing_key");
        std::fs::write(&path, "s3cr3t\n").unwrap();

        let secrets_dir = format!("{}/", dir.path().display());
        let value = resolve_secret(path.to_str().unwrap(), &secrets_dir).unwrap();
        assert_eq!(value, "s3cr3t\n");
    }

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve_secret("plain", "/run/secrets/").unwrap(), "plain");
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");

        let err = SecretValue::File(path.clone()).resolve().unwrap_err();
        assert_eq!(err, ValidationError::UnresolvedSecret { path });
    }
}
