//! Configuration validation utilities
//!
//! Advisory checks run on a loaded configuration. Nothing here rejects a
//! load; the checker binary decides what to do with the report.

use crate::schema::Config;
use std::collections::HashSet;
use std::time::Duration;

/// Shortest signing key not flagged as weak, in bytes
const MIN_SIGNING_KEY_LEN: usize = 32;

/// Longest token lifetime not flagged
const MAX_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_servers(config, &mut report);

        if config.group_checks_enabled() {
            Self::validate_groups(config, &mut report);
            Self::validate_jwt(config, &mut report);
        }

        report
    }

    fn validate_servers(config: &Config, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for server in &config.servers {
            match server.protocol.as_str() {
                "ldaps" => {}
                "ldap" => report.add_warning(
                    "servers.protocol",
                    &format!("{} uses plain ldap, credentials are sent in cleartext", server.host),
                ),
                other => report.add_error(
                    "servers.protocol",
                    &format!("Unsupported protocol '{}' for {}. Valid protocols: ldap, ldaps", other, server.host),
                ),
            }

            if server.port > i64::from(u16::MAX) {
                report.add_error(
                    "servers.port",
                    &format!("Port {} for {} is out of range", server.port, server.host),
                );
            }

            if !seen.insert((server.host.as_str(), server.port)) {
                report.add_warning(
                    "servers",
                    &format!("Duplicate server {}:{}", server.host, server.port),
                );
            }
        }
    }

    fn validate_groups(config: &Config, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for definition in &config.groups.definitions {
            if !seen.insert(definition.as_str()) {
                report.add_warning(
                    "groups.definitions",
                    &format!("Duplicate group definition: {}", definition),
                );
            }
        }
    }

    fn validate_jwt(config: &Config, report: &mut ValidationReport) {
        match config.jwt.expiration() {
            Ok(expiration) if expiration > MAX_EXPIRATION => {
                report.add_warning("jwt.expire", "Token lifetime is longer than 24h");
            }
            Ok(expiration) if expiration.is_zero() => {
                report.add_error("jwt.expire", "Token lifetime cannot be zero");
            }
            Ok(_) => {}
            Err(e) => report.add_error("jwt.expire", &e),
        }

        if config.jwt.signing_key.len() < MIN_SIGNING_KEY_LEN {
            report.add_warning(
                "jwt.signingkey",
                &format!("Signing key is shorter than {} bytes", MIN_SIGNING_KEY_LEN),
            );
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
