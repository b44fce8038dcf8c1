//! HTTP translation subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, path, headers, query, body)
//!     → request.rs (verb resolution, path override + separator folding,
//!                   verbatim header/param copy, lazy body handoff)
//!     → [resilient client dispatches]
//!     → response.rs (status, origin header record, propagation policy,
//!                    gzip flag, unread body handoff)
//! ```

pub mod headers;
pub mod request;
pub mod response;

pub use request::{translate, OutboundRequest, Verb};
pub use response::{apply_response, ClientResponse};
