//! HTTP Adapters
//!
//! reqwest implementation of the `JsonFetcher` port and the tokio
//! timer behind the `Sleeper` port.

pub mod client;
pub mod sleeper;

pub use client::{HttpClientConfig, HttpJsonClient};
pub use sleeper::TokioSleeper;
