//! Shared mocks and fixtures for use case tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::domain::{ChainRoutes, Collection, TrackedCollections};
use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest};

mock! {
  pub Fetcher {}

  #[async_trait]
  impl JsonFetcher for Fetcher {
    async fn fetch_json(&self, request: &JsonRequest) -> Result<Value, FetchError>;
  }
}

pub const QUANT_CONTRACT: &str = "inj1vtd54v4jm50etkjepgtnd7lykr79yvvah8gdgw";
pub const NINJA_CONTRACT: &str = "inj19ly43dgrr2vce8h02a8nw0qujwhrzm9yv8d75c";

pub fn routes() -> ChainRoutes {
  ChainRoutes::new("https://lcd", "https://idx")
}

pub fn tracked() -> TrackedCollections {
  TrackedCollections::new(vec![
    Collection::new(QUANT_CONTRACT, "quant"),
    Collection::new(NINJA_CONTRACT, "ninja"),
  ])
  .expect("fixture collections are valid")
}

pub fn transport_error(request: &JsonRequest) -> FetchError {
  FetchError::Transport {
    url: request.url.clone(),
    message: "connection reset".into(),
  }
}
