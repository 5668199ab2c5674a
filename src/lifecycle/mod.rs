//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Identity → Status source → Remote client → Bind listener
//! ```
//!
//! The process runs until killed; there is no drain phase.

pub mod startup;

pub use startup::{build_state, start, StartupError};
