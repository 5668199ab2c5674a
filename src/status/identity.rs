//! Instance identity, fixed at startup.

use crate::config::ServiceConfig;

/// Values describing this running instance.
///
/// Built once by startup and shared read-only through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    pub host: String,
    pub port: u16,
    pub service: Option<String>,
    pub remote_service: Option<String>,
    pub remote_port: u16,
    pub version: String,
}

impl InstanceIdentity {
    /// Derive the identity from configuration and the OS hostname.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::with_host(local_hostname(), config)
    }

    /// Derive the identity with an explicit hostname.
    pub fn with_host(host: impl Into<String>, config: &ServiceConfig) -> Self {
        Self {
            host: host.into(),
            port: config.listener.port,
            service: config.identity.service.clone(),
            remote_service: config.remote.service.clone(),
            remote_port: config.remote.port,
            version: config.identity.version.clone(),
        }
    }
}

fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read hostname");
            "unknown".to_string()
        }
    }
}
