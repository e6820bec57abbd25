//! Model error type.
//!
//! Value-object operations are total and never fail. Errors only appear where a
//! value crosses a boundary: parsing a closed-set token back out of its string
//! form, or converting to and from wire fields.

use thiserror::Error;

/// Result type used by the model boundaries.
pub type ModelResult<T> = Result<T, ModelError>;

/// Boundary error for the model layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A string is not one of the values a closed-set token type knows about.
    ///
    /// This is only produced when a caller explicitly asks for the typed token;
    /// storing an unknown string is always allowed.
    #[error("unknown {kind} value: {value:?}")]
    UnknownToken { kind: &'static str, value: String },

    /// A value could not be converted to or from its wire fields.
    #[error("wire conversion failed: {0}")]
    Wire(String),
}

impl ModelError {
    pub fn unknown_token(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownToken {
            kind,
            value: value.into(),
        }
    }

    pub fn wire(msg: impl Into<String>) -> Self {
        Self::Wire(msg.into())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::wire(err.to_string())
    }
}
