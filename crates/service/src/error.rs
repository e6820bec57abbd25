use thiserror::Error;

use cloudmodel_core::ModelError;

/// Result type used by transports in this crate.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failure of the in-process transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response payload is registered for the action.
    #[error("no response registered for action {action}")]
    NoResponse { action: &'static str },

    /// The request or response could not cross the wire boundary.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Internal state lock was poisoned by a panicking thread.
    #[error("transport state poisoned")]
    Poisoned,
}
