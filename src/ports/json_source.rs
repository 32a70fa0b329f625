//! JSON Source Port - Remote Read Interface
//!
//! Everything the scanner learns about an address comes from a plain
//! `GET` returning JSON, optionally carrying one static header (the
//! catalog API key). Transport concerns (TLS, pooling, timeouts,
//! request quotas) live behind this trait in the HTTP adapter.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A single remote read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRequest {
  /// Absolute URL.
  pub url: String,
  /// Optional static header as (name, value).
  pub header: Option<(String, String)>,
}

impl JsonRequest {
  pub fn get(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      header: None,
    }
  }

  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.header = Some((name.into(), value.into()));
    self
  }
}

/// Why a remote read produced no usable JSON.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request to {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("{url} answered with HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("response from {url} could not be decoded: {message}")]
  Decode { url: String, message: String },
}

/// Trait for fetching JSON documents.
#[async_trait]
pub trait JsonFetcher: Send + Sync + 'static {
  /// Perform the request and parse the body as JSON.
  async fn fetch_json(&self, request: &JsonRequest) -> Result<Value, FetchError>;
}

/// Fetch and decode into a typed response shape in one step.
pub async fn fetch_typed<F, T>(fetcher: &F, request: &JsonRequest) -> Result<T, FetchError>
where
  F: JsonFetcher + ?Sized,
  T: DeserializeOwned,
{
  let value = fetcher.fetch_json(request).await?;
  serde_json::from_value(value).map_err(|e| FetchError::Decode {
    url: request.url.clone(),
    message: e.to_string(),
  })
}
