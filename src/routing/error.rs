//! Gateway-level error surface.

use axum::http::StatusCode;
use thiserror::Error;

use crate::client::DispatchError;

/// Error recorded on the context when a forward fails.
///
/// Constructed once per failed forward and never retried by this layer.
#[derive(Debug, Error)]
#[error("forwarding error ({cause_code}): {source}")]
pub struct GatewayError {
    /// Status reported to the caller. Forwarding failures are always 500.
    pub status: StatusCode,
    /// Machine-readable cause classification.
    pub cause_code: &'static str,
    /// The underlying failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl GatewayError {
    /// Classify a dispatch failure, preferring the most specific
    /// underlying error type available.
    pub fn from_dispatch(error: DispatchError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            cause_code: error.cause_code(),
            source: Box::new(error),
        }
    }

    /// Wrap a failure that has no finer classification.
    pub fn internal(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            cause_code: "internal",
            source: error.into(),
        }
    }
}
