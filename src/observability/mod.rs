//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging happens inline via `tracing` with the request id
//!   as a correlation field
//! - Metric recording goes through the `metrics` facade; recorder and
//!   exporter setup belong to the embedding application

pub mod metrics;
