//! Transport boundary (mechanics only).
//!
//! The real transport (endpoint resolution, signing, HTTP, retries) is not part
//! of this workspace. What the model layer defines is the shape of the
//! exchange:
//!
//! ```text
//! caller builds request ──► Transport::send ──► marshaller reads fields
//!                                                      │
//! caller reads response ◄── response filled ◄── wire payload
//! ```
//!
//! The request is only borrowed: a transport reads it and never changes it,
//! so the same request value can be resent as is.

use std::sync::Arc;

use crate::request::ServiceRequest;

/// Sends a request and returns its populated response.
///
/// Failures (connectivity, service errors, malformed payloads) come back as
/// `Self::Error`; the model layer adds no error taxonomy of its own.
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send<R: ServiceRequest>(&self, request: &R) -> Result<R::Response, Self::Error>;
}

impl<T> Transport for Arc<T>
where
    T: Transport,
{
    type Error = T::Error;

    fn send<R: ServiceRequest>(&self, request: &R) -> Result<R::Response, Self::Error> {
        (**self).send(request)
    }
}
