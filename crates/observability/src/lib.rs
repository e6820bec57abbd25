//! Tracing/logging setup shared by binaries and tests.
//!
//! Library crates only emit `tracing` events; installing a subscriber is left
//! to the process that links them.

pub mod error;
pub mod logging;

pub use error::ObservabilityError;
pub use logging::{LogConfig, LogFormat, init, init_with};
