//! LDAP JWT configuration checker - command line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "ldap-jwt-config", version, about = "Load and check LDAP JWT configuration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a configuration file and report problems
    Check {
        /// Configuration file (overrides LDAP_JWT_CONFIG_PATH)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Secrets directory (overrides LDAP_JWT_SECRETS_DIR)
        #[arg(short, long)]
        secrets: Option<String>,
    },
    /// Write an example configuration file
    Example {
        #[arg(short, long, default_value = "config.example.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if it exists; report once logging is up
    let dotenv_error = dotenv::dotenv().err().filter(|e| !e.not_found());

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    init_logging(&settings)?;

    if let Some(e) = dotenv_error {
        warn!("Could not load .env file: {}", e);
    }

    match cli.command {
        Command::Check { config, secrets } => check(&settings.with_overrides(config, secrets)),
        Command::Example { output } => {
            ConfigLoader::create_example(&output)?;
            info!("Example configuration written to {}", output.display());
            Ok(())
        }
    }
}

/// Load the configuration and log what a service would run with
fn check(settings: &Settings) -> Result<()> {
    let config = ConfigLoader::load(&settings.config_path, &settings.secrets_dir)
        .with_context(|| {
            format!("Failed to load configuration from {}", settings.config_path.display())
        })?;

    info!("Configuration loaded from: {}", settings.config_path.display());
    for server in &config.servers {
        info!(url = %server.url(), "LDAP server");
    }

    if config.group_checks_enabled() {
        info!(
            groups = config.groups.definitions.len(),
            object_class = %config.groups.object_class,
            member_attribute = %config.groups.member_attribute,
            expiration = %config.jwt.expiration,
            "Group checks enabled"
        );
    } else {
        info!("Group checks disabled");
    }

    let report = ConfigValidator::validate(&config);
    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }
    for issue in &report.errors {
        error!(field = %issue.field, "{}", issue.message);
    }
    info!("{}", report.summary());

    if report.has_errors() {
        anyhow::bail!("Configuration has {} error(s)", report.errors.len());
    }

    Ok(())
}

/// Initialize logging from settings
fn init_logging(settings: &Settings) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_for(path: PathBuf) -> Settings {
        Settings::default().with_overrides(Some(path), None)
    }

    #[test]
    fn test_check_example() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        ConfigLoader::create_example(&path).unwrap();

        assert!(check(&settings_for(path)).is_ok());
    }

    #[test]
    fn test_check_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = check(&settings_for(dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load configuration from"));
    }

    #[test]
    fn test_check_reports_advisory_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "servers:\n  - protocol: http\n    host: dc1\n").unwrap();

        let err = check(&settings_for(path)).unwrap_err();
        assert_eq!(err.to_string(), "Configuration has 1 error(s)");
    }
}
