//! MongoDB-backed status store.
//!
//! # Responsibilities
//! - Hold one pooled driver client for the process lifetime
//! - Read the status record from the collection named after the service
//! - Bound every lookup with the configured deadline
//!
//! # Design Decisions
//! - The driver connects lazily, so startup succeeds with the database down
//! - Lookup uses an empty filter: with several documents the returned one
//!   is whatever the server yields first

use async_trait::async_trait;
use mongodb::{bson::doc, error::ErrorKind, options::ClientOptions, Client};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::DatabaseConfig;
use crate::status::store::{StatusRecord, StatusStore, StoreError, StoreResult};

/// Status store reading from MongoDB.
#[derive(Clone)]
pub struct MongoStatusStore {
    client: Client,
    database: String,
    timeout_duration: Duration,
}

impl MongoStatusStore {
    /// Create the pooled client. No connection is opened yet.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let timeout_duration = Duration::from_millis(config.timeout_ms);
        let uri = config.connection_string();

        let mut options = ClientOptions::parse(uri.as_str())
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid connection string: {}", e)))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(timeout_duration);
        options.server_selection_timeout = Some(timeout_duration);

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::debug!(
            host = %config.host,
            database = %config.name,
            timeout_ms = config.timeout_ms,
            "Status store client initialized"
        );

        Ok(Self {
            client,
            database: config.name.clone(),
            timeout_duration,
        })
    }
}

/// Decode failures are a bad record, everything else is an outage.
fn classify(error: mongodb::error::Error) -> StoreError {
    match *error.kind {
        ErrorKind::BsonDeserialization(ref e) => StoreError::Decode(e.to_string()),
        _ => StoreError::Unavailable(error.to_string()),
    }
}

#[async_trait]
impl StatusStore for MongoStatusStore {
    async fn fetch_status(&self, service: &str) -> StoreResult<StatusRecord> {
        let collection = self
            .client
            .database(&self.database)
            .collection::<StatusRecord>(service);

        let record = timeout(self.timeout_duration, collection.find_one(doc! {}))
            .await
            .map_err(|_| StoreError::Timeout(self.timeout_duration.as_millis() as u64))?
            .map_err(classify)?;

        tracing::debug!(
            database = %self.database,
            collection = %service,
            found = record.is_some(),
            "Status record lookup"
        );

        record.ok_or_else(|| StoreError::NotFound(service.to_string()))
    }
}
