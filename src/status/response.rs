//! Status response body and the source it is produced from.

use axum::body::Bytes;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::status::identity::InstanceIdentity;
use crate::status::store::{StatusStore, StoreError};

/// JSON body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub host: String,
    pub version: String,
    pub service: Option<String>,
    pub port: u16,
    pub remote_service_name: Option<String>,
    pub remote_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl StatusResponse {
    /// Response built from the identity alone (no `env` field).
    pub fn from_identity(identity: &InstanceIdentity) -> Self {
        Self {
            host: identity.host.clone(),
            version: identity.version.clone(),
            service: identity.service.clone(),
            port: identity.port,
            remote_service_name: identity.remote_service.clone(),
            remote_port: identity.remote_port,
            env: None,
        }
    }
}

/// Errors resolving a status response.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Store-backed status needs a service name to pick the collection.
    #[error("service name is not configured")]
    ServiceUnset,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode status: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where `GET /` gets its body from.
#[derive(Clone)]
pub enum StatusSource {
    /// Serialized once at startup; served as-is.
    Static(Bytes),
    /// Read from the store on every request.
    Store(Arc<dyn StatusStore>),
}

impl StatusSource {
    /// Render the identity once for static serving.
    pub fn fixed(identity: &InstanceIdentity) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(&StatusResponse::from_identity(identity))?;
        Ok(StatusSource::Static(Bytes::from(body)))
    }

    /// Produce the response body for one request.
    pub async fn resolve(&self, identity: &InstanceIdentity) -> Result<Bytes, StatusError> {
        match self {
            StatusSource::Static(body) => Ok(body.clone()),
            StatusSource::Store(store) => {
                let service = identity.service.as_deref().ok_or(StatusError::ServiceUnset)?;
                let record = store.fetch_status(service).await?;

                let mut response = StatusResponse::from_identity(identity);
                if let Some(version) = record.version {
                    response.version = version;
                }
                response.env = Some(record.env.unwrap_or_default());

                Ok(Bytes::from(serde_json::to_vec(&response)?))
            }
        }
    }
}
