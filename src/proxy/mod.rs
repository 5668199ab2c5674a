//! Remote service proxying.
//!
//! # Data Flow
//! ```text
//! GET /service
//!     → client.rs RemoteClient::fetch (GET http://{remote}:{port}/)
//!     → full body buffered under the deadline
//!     → http::proxy relays the bytes with status 200
//! ```
//!
//! # Design Decisions
//! - The remote's status code is not propagated
//! - Transport failures and timeouts become error responses, never hangs

pub mod client;

pub use client::{ProxyError, RemoteClient, RemoteReply};
