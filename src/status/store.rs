//! Status store capability and its error type.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Authoritative version/environment for a named service.
///
/// Unknown document fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub env: Option<String>,
}

/// Errors that can occur while reading a status record.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection or query failed.
    #[error("status store unavailable: {0}")]
    Unavailable(String),

    /// Lookup did not finish in time.
    #[error("status lookup timed out after {0} ms")]
    Timeout(u64),

    /// The document exists but does not decode as a status record.
    #[error("malformed status record: {0}")]
    Decode(String),

    /// The collection holds no document.
    #[error("no status record in collection '{0}'")]
    NotFound(String),
}

/// Result type for status store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Source of status records, queried once per status request.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Fetch the status record for `service`.
    async fn fetch_status(&self, service: &str) -> StoreResult<StatusRecord>;
}
