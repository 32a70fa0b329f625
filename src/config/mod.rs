//! Configuration Module - TOML-based Scanner Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides via `.env` files.
//! Contract addresses, collections and endpoints are externalized
//! here - nothing is hardcoded in the domain layer.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Collection, CollectionsError, ReportFormat, TrackedCollections};

/// Top-level scanner configuration.
///
/// Every section is optional in `config.toml`; the defaults describe
/// the Injective mainnet deployment. Required endpoints come from the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Run identity, input and output.
  #[serde(default)]
  pub scanner: ScannerConfig,
  /// Remote endpoints.
  #[serde(default)]
  pub endpoints: EndpointConfig,
  /// On-chain identifiers.
  #[serde(default)]
  pub chain: ChainConfig,
  /// Pacing configuration.
  #[serde(default)]
  pub rate_limits: RateLimitConfig,
  /// Tracked NFT collections.
  #[serde(default = "default_collections")]
  pub collections: Vec<CollectionConfig>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      scanner: ScannerConfig::default(),
      endpoints: EndpointConfig::default(),
      chain: ChainConfig::default(),
      rate_limits: RateLimitConfig::default(),
      collections: default_collections(),
    }
  }
}

/// Scanner input and output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Registrant sheet export (`REGISTERED_FILE`).
  #[serde(default)]
  pub registered_file: String,
  /// Report artifact path (`RESULTS_FILE`).
  #[serde(default = "default_results_file")]
  pub results_file: String,
  /// Report layout.
  #[serde(default)]
  pub report_format: ReportFormat,
  /// Prometheus textfile path; metrics are disabled when unset.
  #[serde(default)]
  pub metrics_path: Option<String>,
}

impl Default for ScannerConfig {
  fn default() -> Self {
    Self {
      log_level: default_log_level(),
      registered_file: String::new(),
      results_file: default_results_file(),
      report_format: ReportFormat::default(),
      metrics_path: None,
    }
  }
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
  /// Chain REST (LCD) base URL (`RPC_URL`).
  #[serde(default)]
  pub rpc_url: String,
  /// Explorer indexer base URL (`INDEXER_URL`).
  #[serde(default)]
  pub indexer_url: String,
  /// NFT catalog base URL (`CATALOG_URL`); enables catalog ownership
  /// together with `catalog_api_key`.
  #[serde(default)]
  pub catalog_url: Option<String>,
  /// Catalog API key (`CATALOG_API_KEY`).
  #[serde(default)]
  pub catalog_api_key: Option<String>,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Outgoing request quota; unthrottled when unset.
  #[serde(default)]
  pub requests_per_second: Option<u32>,
}

impl Default for EndpointConfig {
  fn default() -> Self {
    Self {
      rpc_url: String::new(),
      indexer_url: String::new(),
      catalog_url: None,
      catalog_api_key: None,
      timeout_seconds: default_timeout(),
      requests_per_second: None,
    }
  }
}

/// On-chain identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
  /// Native token denomination.
  #[serde(default = "default_native_denom")]
  pub native_denom: String,
  /// Marketplace contract listing sell orders.
  #[serde(default = "default_marketplace")]
  pub marketplace_contract: String,
  /// Vault manager contract.
  #[serde(default = "default_vault")]
  pub vault_contract: String,
  /// Event type prefix of the exchange module.
  #[serde(default = "default_exchange_namespace")]
  pub exchange_event_namespace: String,
}

impl Default for ChainConfig {
  fn default() -> Self {
    Self {
      native_denom: default_native_denom(),
      marketplace_contract: default_marketplace(),
      vault_contract: default_vault(),
      exchange_event_namespace: default_exchange_namespace(),
    }
  }
}

/// Batch pacing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  /// Addresses per batch; 0 disables pacing.
  #[serde(default = "default_batch_size")]
  pub batch_size: usize,
  /// Pause after each batch (milliseconds).
  #[serde(default = "default_batch_pause")]
  pub batch_pause_ms: u64,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      batch_size: default_batch_size(),
      batch_pause_ms: default_batch_pause(),
    }
  }
}

/// One tracked NFT collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
  /// Display name written to the report.
  pub name: String,
  /// CW721 contract address.
  pub contract_address: String,
  /// Catalog family name, when it differs from `name`.
  #[serde(default)]
  pub catalog_family: Option<String>,
}

impl AppConfig {
  /// Tracked collections in configuration order.
  pub fn tracked_collections(&self) -> Result<TrackedCollections, CollectionsError> {
    TrackedCollections::new(
      self
        .collections
        .iter()
        .map(|c| Collection {
          contract_address: c.contract_address.clone(),
          name: c.name.clone(),
          catalog_family: c.catalog_family.clone(),
        })
        .collect(),
    )
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.endpoints.timeout_seconds)
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_results_file() -> String {
  "results.json".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_native_denom() -> String {
  "inj".to_string()
}

fn default_marketplace() -> String {
  "inj1l9nh9wv24fktjvclc4zgrgyzees7rwdtx45f54".to_string()
}

fn default_vault() -> String {
  "inj1vcqkkvqs7prqu70dpddfj7kqeqfdz5gg662qs3".to_string()
}

fn default_exchange_namespace() -> String {
  "injective.exchange.v1beta1.".to_string()
}

fn default_batch_size() -> usize {
  5
}

fn default_batch_pause() -> u64 {
  1000
}

fn default_collections() -> Vec<CollectionConfig> {
  vec![
    CollectionConfig {
      name: "quant".to_string(),
      contract_address: "inj1vtd54v4jm50etkjepgtnd7lykr79yvvah8gdgw".to_string(),
      catalog_family: None,
    },
    CollectionConfig {
      name: "ninja".to_string(),
      contract_address: "inj19ly43dgrr2vce8h02a8nw0qujwhrzm9yv8d75c".to_string(),
      catalog_family: None,
    },
  ]
}
