//! Metrics collection.
//!
//! # Metrics
//! - `gateway_forwards_total` (counter): completed forwards by service, status
//! - `gateway_forward_errors_total` (counter): failed forwards by service, cause
//! - `gateway_forward_duration_seconds` (histogram): forward latency by service
//!
//! # Design Decisions
//! - Cheap to record; label cardinality bounded by service names, status
//!   codes, and cause tags

use std::time::Instant;

use metrics::{counter, histogram};

/// Record a completed forward.
pub fn record_forward(service: &str, status: u16, start: Instant) {
    counter!(
        "gateway_forwards_total",
        "service" => service.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "gateway_forward_duration_seconds",
        "service" => service.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a failed forward.
pub fn record_forward_error(service: &str, cause: &'static str, start: Instant) {
    counter!(
        "gateway_forward_errors_total",
        "service" => service.to_string(),
        "cause" => cause
    )
    .increment(1);

    histogram!(
        "gateway_forward_duration_seconds",
        "service" => service.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
