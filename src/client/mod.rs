//! Resilient client seam.
//!
//! # Data Flow
//! ```text
//! service id ──ClientFactory::client_for──▶ ClientHandle
//! OutboundRequest ──ClientHandle::execute──▶ ClientResponse | DispatchError
//! ```
//!
//! # Design Decisions
//! - Load balancing, circuit breaking, retries, timeouts, and discovery all
//!   live behind `ClientHandle`; the forwarding core only sees the
//!   two-level `DispatchError` structure
//! - Both traits are dyn-safe so embedders can inject their own stacks
//! - The bundled `HttpTransport`/`ClientRegistry` pair is a plain wiring
//!   default, not a resilience implementation

pub mod error;
pub mod registry;
pub mod transport;

pub use error::{DispatchError, FallbackKind, TransportError};
pub use registry::ClientRegistry;
pub use transport::HttpTransport;

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::request::OutboundRequest;
use crate::http::response::ClientResponse;

/// A dispatch-capable client bound to one logical service.
#[async_trait]
pub trait ClientHandle: Send + Sync {
    /// Dispatch one outbound request. The caller suspends until the client
    /// produces a reply or a failure; any retrying happens behind this
    /// call, invisibly.
    async fn execute(&self, request: OutboundRequest) -> Result<ClientResponse, DispatchError>;
}

/// Resolves logical service identifiers to client handles.
pub trait ClientFactory: Send + Sync {
    /// Returns `None` when the service is unknown to this factory.
    fn client_for(&self, service_id: &str) -> Option<Arc<dyn ClientHandle>>;
}
