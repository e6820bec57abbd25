//! `cloudmodel-core`: value-object building blocks for the API model.
//!
//! This crate contains the generic mechanism every model type is built from
//! (no transport, no marshalling format):
//!
//! - [`ValueObject`] / [`FieldValue`]: structural equality, hash and display
//! - [`value_object!`]: declares a concrete request, response or descriptor
//! - [`sequence`]: copy-in assignment for sequence fields
//! - [`EnumToken`] / [`string_enum!`]: open enumerated-string fields
//! - [`wire`]: field-level boundary used by marshallers

pub mod error;
pub mod sequence;
pub mod token;
pub mod value_object;
pub mod wire;

pub use error::{ModelError, ModelResult};
pub use token::EnumToken;
pub use value_object::{FieldValue, ValueObject};
pub use wire::WireFields;

// Lets the macros name this crate the same way inside and outside of it.
extern crate self as cloudmodel_core;

#[doc(hidden)]
pub mod macro_support {
    pub use paste;
    pub use serde;
}
