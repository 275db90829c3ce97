//! Runtime settings for the checker binary

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for settings, e.g. `LDAP_JWT_CONFIG_PATH`
const ENV_PREFIX: &str = "LDAP_JWT_";

/// Where to find the configuration and how to log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Configuration file to load
    pub config_path: PathBuf,
    /// Secrets directory; blank selects `/run/secrets/`
    pub secrets_dir: String,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log format (json, pretty)
    pub log_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yaml"),
            secrets_dir: String::new(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Build settings from defaults overridden by `LDAP_JWT_*` variables
    pub fn from_env() -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("Failed to read settings from environment")
    }

    /// Apply command line flags, which take precedence over the environment
    pub fn with_overrides(mut self, config_path: Option<PathBuf>, secrets_dir: Option<String>) -> Self {
        if let Some(path) = config_path {
            self.config_path = path;
        }
        if let Some(dir) = secrets_dir {
            self.secrets_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let settings = Settings::from_env().map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("LDAP_JWT_CONFIG_PATH", "/etc/ldap-jwt/config.yaml");
            jail.set_env("LDAP_JWT_SECRETS_DIR", "/var/secrets/");
            jail.set_env("LDAP_JWT_LOG_FORMAT", "json");

            let settings = Settings::from_env().map_err(|e| e.to_string())?;
            assert_eq!(settings.config_path, PathBuf::from("/etc/ldap-jwt/config.yaml"));
            assert_eq!(settings.secrets_dir, "/var/secrets/");
            assert_eq!(settings.log_format, "json");
            assert_eq!(settings.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_flag_overrides() {
        let settings = Settings::default()
            .with_overrides(Some(PathBuf::from("other.yaml")), None);
        assert_eq!(settings.config_path, PathBuf::from("other.yaml"));
        assert_eq!(settings.secrets_dir, "");

        let settings = settings.with_overrides(None, Some("/tmp/secrets/".to_string()));
        assert_eq!(settings.config_path, PathBuf::from("other.yaml"));
        assert_eq!(settings.secrets_dir, "/tmp/secrets/");
    }
}
