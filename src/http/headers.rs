//! Response header propagation policy.
//!
//! # Responsibilities
//! - Decide which backend response headers reach the caller
//! - Detect gzip-family content encodings
//!
//! # Design Decisions
//! - Hop-by-hop and payload-framing headers are excluded: their values stop
//!   being valid once the gateway re-frames the response (re-chunking,
//!   re-compressing, or terminating the backend connection on its own)
//! - Everything else passes through, including unknown and custom names

/// Whether a response header propagates to the caller-visible set.
/// Case-insensitive on the header name.
pub fn is_included_header(name: &str) -> bool {
    !matches!(
        name.to_ascii_lowercase().as_str(),
        "connection" | "content-length" | "content-encoding" | "server" | "transfer-encoding"
    )
}

/// Whether a Content-Encoding value indicates a gzip-family encoding.
pub fn is_gzip_encoding(value: &str) -> bool {
    value.to_ascii_lowercase().contains("gzip")
}
