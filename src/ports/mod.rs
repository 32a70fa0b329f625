//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `JsonFetcher`: remote JSON reads (chain REST, explorer, catalog)
//! - `Sleeper`: cooperative pauses for the batch pacer
//! - `ScanObserver`: per-address progress and soft-failure reporting
//! - `ReportSink`: the output artifact

pub mod json_source;
pub mod observer;
pub mod report_sink;
pub mod sleeper;
