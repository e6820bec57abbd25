//! `cloudmodel-service`: request/response pairing and the transport boundary.
//!
//! Nothing here talks to a network. The crate records which response type
//! belongs to which request, the optional request capabilities (dry run,
//! idempotency token), and the trait a real transport implements.

pub mod error;
pub mod in_memory;
pub mod request;
pub mod transport;

pub use error::{TransportError, TransportResult};
pub use in_memory::{InMemoryTransport, RecordedCall};
pub use request::{DRY_RUN_FIELD, DryRunSupported, IdempotentRequest, ServiceRequest};
pub use transport::Transport;
