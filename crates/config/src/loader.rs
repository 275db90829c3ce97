//! Configuration loader implementation

use crate::defaults::{
    DEFAULT_EXPIRATION, DEFAULT_MEMBER_ATTRIBUTE, DEFAULT_OBJECT_CLASS, DEFAULT_PORT,
    DEFAULT_PROTOCOL,
};
use crate::schema::Config;
use crate::secret::{normalize_secrets_dir, resolve_secret};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, info};
use types::{utils::is_blank, ConfigError, Result, ValidationError};

/// Configuration loader that reads, defaults and validates a YAML document
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// `secrets_dir` selects which credential values are read from files; a
    /// blank value means `/run/secrets/`.
    pub fn load<P: AsRef<Path>>(config_path: P, secrets_dir: &str) -> Result<Config> {
        let config_path = config_path.as_ref();
        debug!(path = %config_path.display(), "loading configuration");

        let content = std::fs::read(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content, config_path)?;
        Self::apply(config, secrets_dir)
    }

    /// Load configuration from string (for testing and tooling)
    pub fn load_from_str(yaml_content: &str, secrets_dir: &str) -> Result<Config> {
        let config = Self::parse(yaml_content.as_bytes(), Path::new("<string>"))?;
        Self::apply(config, secrets_dir)
    }

    /// Strictly deserialize a document; unknown keys are errors
    fn parse(content: &[u8], path: &Path) -> Result<Config> {
        // An empty document has nothing to deserialize
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Config::default());
        }

        serde_yaml::from_slice(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply defaults, validate and resolve secrets
    fn apply(mut config: Config, secrets_dir: &str) -> Result<Config> {
        let secrets_dir = normalize_secrets_dir(secrets_dir);

        if config.servers.is_empty() {
            return Err(ValidationError::NoServers.into());
        }

        for server in &mut config.servers {
            if is_blank(&server.protocol) {
                server.protocol = DEFAULT_PROTOCOL.to_string();
            }
            if is_blank(&server.host) {
                return Err(ValidationError::MissingHost.into());
            }
            if server.port <= 0 {
                server.port = DEFAULT_PORT;
            }
        }

        if config.group_checks_enabled() {
            Self::apply_group_checks(&mut config, secrets_dir)?;
        } else {
            debug!("no group definitions, skipping user, groups and jwt validation");
        }

        info!(
            servers = config.servers.len(),
            group_checks = config.group_checks_enabled(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Validate the sections only needed when group membership is checked
    fn apply_group_checks(config: &mut Config, secrets_dir: &str) -> Result<()> {
        debug!(
            groups = config.groups.definitions.len(),
            secrets_dir, "validating group check settings"
        );

        let user = &mut config.user;
        if is_blank(&user.name) {
            return Err(ValidationError::MissingUserName.into());
        }
        user.name = resolve_secret(&user.name, secrets_dir)?;

        if is_blank(&user.password) {
            return Err(ValidationError::MissingPassword.into());
        }
        user.password = resolve_secret(&user.password, secrets_dir)?;

        let groups = &mut config.groups;
        if is_blank(&groups.object_class) {
            groups.object_class = DEFAULT_OBJECT_CLASS.to_string();
        }
        if is_blank(&groups.member_attribute) {
            groups.member_attribute = DEFAULT_MEMBER_ATTRIBUTE.to_string();
        }
        if groups.definitions.iter().any(|d| is_blank(d)) {
            return Err(ValidationError::InvalidGroupDefinition.into());
        }

        let jwt = &mut config.jwt;
        if is_blank(&jwt.expiration) {
            jwt.expiration = DEFAULT_EXPIRATION.to_string();
        }
        if is_blank(&jwt.signing_key) {
            return Err(ValidationError::MissingSigningKey.into());
        }
        jwt.signing_key = resolve_secret(&jwt.signing_key, secrets_dir)?;

        Ok(())
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
        let yaml_content = serde_yaml::to_string(&Config::example())
            .context("Failed to serialize example configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}
