//! Lightweight in-process metrics (dependency-free).
//!
//! Counters and a latency histogram stored as atomics, rendered in Prometheus
//! text format for the host to expose however it likes.

pub mod metrics;

pub use metrics::PolicyMetrics;
