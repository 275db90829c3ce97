//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// LDAP servers, tried in order
    pub servers: Vec<Server>,
    /// Bind identity used for group membership checks
    pub user: BindUser,
    /// Groups allowed to obtain a token
    pub groups: AllowedGroups,
    /// Token signing parameters
    pub jwt: JwtConfig,
}

/// LDAP server connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Server {
    /// `ldap` or `ldaps`
    pub protocol: String,
    /// Host name or address
    pub host: String,
    /// TCP port
    pub port: i64,
}

/// User which binds to check group membership
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindUser {
    /// Bind DN, or a path to a file holding it
    pub name: String,
    /// Bind password, or a path to a file holding it
    pub password: String,
}

/// Groups used to limit access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllowedGroups {
    #[serde(rename = "objectclass")]
    pub object_class: String,
    #[serde(rename = "memberattribute")]
    pub member_attribute: String,
    /// Group DNs; an empty list disables group checks
    pub definitions: Vec<String>,
}

/// JWT configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JwtConfig {
    /// Token lifetime as a duration string, e.g. `5m`
    #[serde(rename = "expire")]
    pub expiration: String,
    /// HMAC signing key, or a path to a file holding it
    #[serde(rename = "signingkey")]
    pub signing_key: String,
}

impl Config {
    /// Whether group membership checks are configured
    pub fn group_checks_enabled(&self) -> bool {
        !self.groups.definitions.is_empty()
    }

    /// Configuration written by `ConfigLoader::create_example`
    pub fn example() -> Self {
        Self {
            servers: vec![Server {
                protocol: "ldaps".to_string(),
                host: "ldap.example.com".to_string(),
                port: 636,
            }],
            user: BindUser {
                name: "cn=reader,ou=services,dc=example,dc=com".to_string(),
                password: "change-me".to_string(),
            },
            groups: AllowedGroups {
                object_class: "user".to_string(),
                member_attribute: "memberOf".to_string(),
                definitions: vec!["cn=admins,ou=groups,dc=example,dc=com".to_string()],
            },
            jwt: JwtConfig {
                expiration: "5m".to_string(),
                signing_key: "change-me-to-a-long-random-signing-key".to_string(),
            },
        }
    }
}

impl Server {
    /// Connection URL, e.g. `ldaps://ldap.example.com:636`
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl JwtConfig {
    /// Parse the expiration into a `Duration`
    pub fn expiration(&self) -> Result<Duration, String> {
        types::utils::parse_duration(&self.expiration)
    }
}

// Credentials never show up in debug output
impl fmt::Debug for BindUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindUser")
            .field("name", &self.name)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("expiration", &self.expiration)
            .field("signing_key", &redacted(&self.signing_key))
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "[REDACTED]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_keys() {
        let yaml = serde_yaml::to_string(&Config::example()).unwrap();
        assert!(yaml.contains("servers:"));
        assert!(yaml.contains("objectclass: user"));
        assert!(yaml.contains("memberattribute: memberOf"));
        assert!(yaml.contains("expire: 5m"));
        assert!(yaml.contains("signingkey:"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let config: Config = serde_yaml::from_str("servers:\n  - host: ldap.local\n").unwrap();
        assert_eq!(config.servers[0].host, "ldap.local");
        assert_eq!(config.servers[0].protocol, "");
        assert_eq!(config.servers[0].port, 0);
        assert_eq!(config.user, BindUser::default());
        assert!(!config.group_checks_enabled());
    }

    #[test]
    fn test_server_url() {
        let server = Server {
            protocol: "ldap".to_string(),
            host: "dc1.corp".to_string(),
            port: 389,
        };
        assert_eq!(server.url(), "ldap://dc1.corp:389");
    }

    #[test]
    fn test_expiration() {
        let jwt = JwtConfig {
            expiration: "1h30m".to_string(),
            signing_key: String::new(),
        };
        assert_eq!(jwt.expiration().unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = Config::example();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("change-me"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("cn=reader"));
    }
}
