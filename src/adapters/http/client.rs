//! HTTP JSON Client - Quota-limited REST Reader
//!
//! Wraps reqwest with a per-request timeout, connection pooling and an
//! optional token-bucket request quota for every remote read the
//! scanner makes. No retries: a failed read is reported once and the
//! caller decides whether it is fatal.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum requests per second; `None` leaves requests unthrottled.
  pub requests_per_second: Option<u32>,
}

impl Default for HttpClientConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
      requests_per_second: None,
    }
  }
}

/// reqwest-backed [`JsonFetcher`].
pub struct HttpJsonClient {
  /// Underlying HTTP client.
  http: Client,
  /// Outgoing request quota.
  limiter: Option<DefaultDirectRateLimiter>,
}

impl HttpJsonClient {
  /// Create a new client.
  pub fn new(config: HttpClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .build()
      .context("Failed to build HTTP client")?;

    let limiter = config
      .requests_per_second
      .and_then(NonZeroU32::new)
      .map(|rate| RateLimiter::direct(Quota::per_second(rate)));

    Ok(Self { http, limiter })
  }
}

#[async_trait]
impl JsonFetcher for HttpJsonClient {
  async fn fetch_json(&self, request: &JsonRequest) -> Result<Value, FetchError> {
    if let Some(limiter) = &self.limiter {
      limiter.until_ready().await;
    }

    let mut builder = self.http.get(&request.url);
    if let Some((name, value)) = &request.header {
      builder = builder.header(name.as_str(), value.as_str());
    }

    debug!(url = %request.url, "GET");

    let response = builder.send().await.map_err(|e| {
      warn!(url = %request.url, error = %e, "Request failed");
      FetchError::Transport {
        url: request.url.clone(),
        message: e.to_string(),
      }
    })?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        url: request.url.clone(),
        status: status.as_u16(),
      });
    }

    response.json::<Value>().await.map_err(|e| FetchError::Decode {
      url: request.url.clone(),
      message: e.to_string(),
    })
  }
}
