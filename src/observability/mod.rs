//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`, initialized once in `main`
//! - Request metrics are cheap label-based counters/histograms, exposed on
//!   a Prometheus endpoint when enabled
//! - Request ID flows through log lines via the injection middleware

pub mod metrics;
