//! In-memory transport for tests/dev.

use std::collections::HashMap;
use std::sync::Mutex;

use cloudmodel_core::{ValueObject, WireFields, wire};

use crate::error::{TransportError, TransportResult};
use crate::request::ServiceRequest;
use crate::transport::Transport;

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub action: &'static str,
    pub fields: WireFields,
}

/// Canned-response transport.
///
/// - No IO / no async
/// - Requests go through the wire boundary exactly as a real marshaller
///   would read them, and are recorded in send order
/// - Responses are registered per action as wire fields and rebuilt on every
///   send, so each caller gets its own response value
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    responses: Mutex<HashMap<&'static str, WireFields>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response returned for every `R` request.
    pub fn respond_with<R: ServiceRequest>(&self, response: &R::Response) -> TransportResult<()> {
        let fields = wire::to_fields(response)?;
        self.respond_with_fields(R::ACTION, fields)
    }

    /// Register a raw wire payload for `action`.
    ///
    /// Useful for payloads a typed value cannot produce, such as fields added
    /// by a newer service version.
    pub fn respond_with_fields(&self, action: &'static str, fields: WireFields) -> TransportResult<()> {
        let mut responses = self.responses.lock().map_err(|_| TransportError::Poisoned)?;
        responses.insert(action, fields);
        Ok(())
    }

    /// Requests sent so far, oldest first.
    pub fn calls(&self) -> TransportResult<Vec<RecordedCall>> {
        let calls = self.calls.lock().map_err(|_| TransportError::Poisoned)?;
        Ok(calls.clone())
    }
}

impl Transport for InMemoryTransport {
    type Error = TransportError;

    fn send<R: ServiceRequest>(&self, request: &R) -> Result<R::Response, Self::Error> {
        let fields = wire::to_fields(request)?;
        tracing::debug!(action = R::ACTION, fields = fields.len(), "sending request");

        self.calls
            .lock()
            .map_err(|_| TransportError::Poisoned)?
            .push(RecordedCall {
                action: R::ACTION,
                fields,
            });

        let payload = self
            .responses
            .lock()
            .map_err(|_| TransportError::Poisoned)?
            .get(R::ACTION)
            .cloned();

        let Some(payload) = payload else {
            tracing::warn!(action = R::ACTION, "no response registered");
            return Err(TransportError::NoResponse { action: R::ACTION });
        };

        let response = wire::from_fields::<R::Response>(payload)?;
        tracing::debug!(
            action = R::ACTION,
            present = response.present_fields().len(),
            "received response"
        );
        Ok(response)
    }
}
