//! Startup orchestration.
//!
//! # Responsibilities
//! - Derive the instance identity
//! - Choose the status source (static body or status store)
//! - Create the remote client
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Unset service names are logged, not rejected

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ServiceConfig};
use crate::http::{AppState, HttpServer};
use crate::proxy::RemoteClient;
use crate::status::{InstanceIdentity, MongoStatusStore, StatusSource, StoreError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize status store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to render status: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the shared handler state from configuration.
pub async fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let identity = Arc::new(InstanceIdentity::from_config(config));

    if identity.service.is_none() {
        tracing::warn!("SERVICE is not set; status will report a null service");
    }
    if identity.remote_service.is_none() {
        tracing::warn!("REMOTE_SERVICE is not set; /service will answer 502");
    }

    let status = match &config.database {
        Some(db) => StatusSource::Store(Arc::new(MongoStatusStore::connect(db).await?)),
        None => StatusSource::fixed(&identity)?,
    };

    let remote = RemoteClient::new(&config.remote);

    tracing::debug!(
        host = %identity.host,
        version = %identity.version,
        service = ?identity.service,
        remote = ?remote.target().map(ToString::to_string),
        store_backed = config.database.is_some(),
        "Instance identity resolved"
    );

    Ok(AppState {
        identity,
        status,
        remote,
    })
}

/// Bind the TCP listener.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Full startup: state first, listener last.
pub async fn start(config: &ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let state = build_state(config).await?;
    let listener = bind(&config.listener).await?;
    Ok((HttpServer::new(state), listener))
}
