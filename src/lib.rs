//! Status-and-proxy service library.
//!
//! Serves `GET /` (instance self-description, optionally enriched from a
//! MongoDB status record) and `GET /service` (relays the configured remote
//! service's body).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod status;

pub use config::ServiceConfig;
pub use http::{AppState, HttpServer};
