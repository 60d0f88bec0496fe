//! Lightweight in-process metrics (dependency-free apart from `DashMap`).
//!
//! Counters and gauges are plain atomics keyed by sorted label sets and are
//! rendered in Prometheus text format by the `/metrics` handler. They are
//! write-only from the session's point of view: nothing in the echo path reads
//! them back.

pub mod metrics;

pub use metrics::ServerMetrics;
