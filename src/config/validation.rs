//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges. All errors are
//! collected, not just the first.

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroListenPort,

    #[error("remote.port must be non-zero")]
    ZeroRemotePort,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("database.name must not be empty")]
    MissingDatabaseName,

    #[error("database.host must not be empty")]
    MissingDatabaseHost,
}

/// Validate a configuration: `ServiceConfig → Result<(), Vec<ValidationError>>`.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroListenPort);
    }
    if config.remote.port == 0 {
        errors.push(ValidationError::ZeroRemotePort);
    }
    if config.remote.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("remote.timeout_ms"));
    }

    if let Some(db) = &config.database {
        if db.name.is_empty() {
            errors.push(ValidationError::MissingDatabaseName);
        }
        if db.host.is_empty() {
            errors.push(ValidationError::MissingDatabaseHost);
        }
        if db.timeout_ms == 0 {
            errors.push(ValidationError::ZeroTimeout("database.timeout_ms"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
