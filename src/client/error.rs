//! Failure taxonomy for the client seam.
//!
//! Mirrors the two-level structure resilient clients produce: a protective
//! layer's fallback, optionally wrapping the transport failure that
//! triggered it, or a bare transport failure where no protective layer was
//! involved.

use std::fmt;

use thiserror::Error;

/// Why the protective layer refused or abandoned the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// The circuit was open; the backend was never called.
    ShortCircuit,
    /// Concurrency capacity was exhausted; the call was rejected.
    CapacityExhausted,
    /// The guarded call exceeded the client's own deadline.
    Timeout,
    /// The guarded call itself failed.
    CommandFailure,
}

impl FallbackKind {
    /// Stable machine-readable tag, used as a gateway error cause code.
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackKind::ShortCircuit => "short_circuit",
            FallbackKind::CapacityExhausted => "capacity_exhausted",
            FallbackKind::Timeout => "timeout",
            FallbackKind::CommandFailure => "command_failure",
        }
    }
}

impl fmt::Display for FallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-level client failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("read timed out")]
    ReadTimeout,
    #[error("unknown host: {0}")]
    UnknownHost(String),
    #[error("protocol error: {0}")]
    Protocol(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("client error: {0}")]
    General(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Stable machine-readable tag, used as a gateway error cause code.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Connect(_) => "connect_failed",
            TransportError::ReadTimeout => "read_timeout",
            TransportError::UnknownHost(_) => "unknown_host",
            TransportError::Protocol(_) => "protocol_error",
            TransportError::General(_) => "general",
        }
    }
}

/// Failure surface of [`ClientHandle::execute`].
///
/// [`ClientHandle::execute`]: crate::client::ClientHandle::execute
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The protective layer declined to call the backend, or the guarded
    /// call failed inside it.
    #[error("resilient client fallback ({kind})")]
    Fallback {
        kind: FallbackKind,
        #[source]
        cause: Option<TransportError>,
    },
    /// A transport failure with no protective layer involved.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// The most specific classification tag available: a recognized nested
    /// transport cause wins over the outer fallback kind.
    pub fn cause_code(&self) -> &'static str {
        match self {
            DispatchError::Fallback {
                cause: Some(cause), ..
            } => cause.error_type(),
            DispatchError::Fallback { kind, cause: None } => kind.as_str(),
            DispatchError::Transport(error) => error.error_type(),
        }
    }
}
