//! Default values applied while loading a configuration

/// Protocol used when a server entry leaves it blank
pub const DEFAULT_PROTOCOL: &str = "ldaps";

/// Port used when a server entry has a non-positive port
pub const DEFAULT_PORT: i64 = 636;

/// Object class searched for during group checks
pub const DEFAULT_OBJECT_CLASS: &str = "user";

/// Attribute holding group membership
pub const DEFAULT_MEMBER_ATTRIBUTE: &str = "memberOf";

/// Token lifetime
pub const DEFAULT_EXPIRATION: &str = "5m";

/// Directory whose paths are treated as secret references
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets/";
