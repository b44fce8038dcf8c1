//! Outbound forwarding core for an HTTP gateway.
//!
//! Given an inbound request that the routing layer has already mapped to a
//! logical backend service, this crate translates it into an outbound
//! request, dispatches it through a resilient client collaborator, and
//! writes the backend's reply (or a classified error) back into the
//! per-request context.
//!
//! # Data Flow
//! ```text
//! Inbound Request + RequestContext (service id resolved upstream)
//!     → http/request.rs   (translate: verb, path, headers, params, body)
//!     → client            (ClientHandle::execute — load balancing,
//!                          circuit breaking, retries live behind this seam)
//!     → success: http/response.rs (status, filtered headers, body stream,
//!                                  gzip flag → RequestContext)
//!     → failure: routing/error.rs (classify → GatewayError → RequestContext)
//! ```
//!
//! # Design Decisions
//! - All per-request state lives in an explicitly passed [`RequestContext`];
//!   the filter itself is stateless and lock-free
//! - Body streams are single-consumer and moved, never cloned or re-read
//! - Exactly one dispatch attempt per request; retry policy belongs to the
//!   resilient client behind [`client::ClientHandle`]

pub mod client;
pub mod config;
pub mod context;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use context::RequestContext;
pub use routing::forward::ForwardingFilter;
pub use routing::GatewayError;
