//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{DatabaseConfig, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration (no validation).
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build the effective configuration: optional TOML file, then the process
/// environment on top, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    apply_env(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Recognised: `PORT`, `REMOTE_PORT`, `SERVICE`, `REMOTE_SERVICE`, `VERSION`,
/// `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `DB_HOST`. Any `DB_*` variable
/// enables the database section.
pub fn apply_env<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = parse_port("PORT", port)?;
    }
    if let Some(port) = lookup("REMOTE_PORT") {
        config.remote.port = parse_port("REMOTE_PORT", port)?;
    }
    if let Some(service) = lookup("SERVICE") {
        config.identity.service = Some(service);
    }
    if let Some(remote) = lookup("REMOTE_SERVICE") {
        config.remote.service = Some(remote);
    }
    if let Some(version) = lookup("VERSION") {
        config.identity.version = version;
    }

    let db_vars = [
        ("DB_USER", lookup("DB_USER")),
        ("DB_PASSWORD", lookup("DB_PASSWORD")),
        ("DB_NAME", lookup("DB_NAME")),
        ("DB_HOST", lookup("DB_HOST")),
    ];
    if db_vars.iter().any(|(_, v)| v.is_some()) {
        let db = config.database.get_or_insert_with(DatabaseConfig::default);
        for (var, value) in db_vars {
            let Some(value) = value else { continue };
            match var {
                "DB_USER" => db.user = value,
                "DB_PASSWORD" => db.password = value,
                "DB_NAME" => db.name = value,
                _ => db.host = value,
            }
        }
    }

    Ok(())
}

fn parse_port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
