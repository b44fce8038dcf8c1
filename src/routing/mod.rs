//! Routing subsystem: the route-phase forwarding filter and its error
//! surface.
//!
//! # Data Flow
//! ```text
//! RequestContext (service id resolved by an upstream filter)
//!     → forward.rs (eligibility check, translate, dispatch once)
//!     → success: response state written to the context
//!     → failure: error.rs classifies into a GatewayError on the context
//! ```
//!
//! # Design Decisions
//! - The filter never throws past its boundary; every outcome lands in
//!   the context for the downstream response writer
//! - Chain scheduling (which filter runs when) is the embedder's concern;
//!   filters only declare their phase and order

pub mod error;
pub mod filter;
pub mod forward;

pub use error::GatewayError;
pub use filter::{Filter, FilterType};
pub use forward::ForwardingFilter;
