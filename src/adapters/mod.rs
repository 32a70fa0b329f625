//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, timers, file I/O). Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `http`: reqwest JSON reader with optional request quota, tokio sleeper
//! - `metrics`: Prometheus counters and textfile export
//! - `persistence`: registrant sheet loader and atomic report store

pub mod http;
pub mod metrics;
pub mod persistence;
