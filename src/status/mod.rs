//! Instance status subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ServiceConfig → identity.rs (hostname + configured values)
//!     → response.rs StatusSource
//!           Static: body rendered once
//!           Store:  mongo.rs client created once (pooled)
//!
//! GET /:
//!     StatusSource::resolve
//!         Static → cached bytes
//!         Store  → store.rs fetch_status(service) → merge → JSON
//! ```

pub mod identity;
pub mod mongo;
pub mod response;
pub mod store;

pub use identity::InstanceIdentity;
pub use mongo::MongoStatusStore;
pub use response::{StatusError, StatusResponse, StatusSource};
pub use store::{StatusRecord, StatusStore, StoreError, StoreResult};
