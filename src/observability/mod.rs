//! Observability subsystem.
//!
//! Structured log events via `tracing`; request IDs are attached by the
//! HTTP layer and flow into the proxy call.

pub mod logging;

pub use logging::init_logging;
