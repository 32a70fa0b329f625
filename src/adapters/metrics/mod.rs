//! Metrics Adapters
//!
//! Prometheus counters behind the `ScanObserver` port, exported as a
//! text file at the end of a run.

pub mod prometheus;

pub use prometheus::ScanMetrics;
