//! Configuration Loader - File Loading, Overrides and Validation
//!
//! Handles loading `config.toml`, applying environment overrides,
//! validating all parameters, and providing clear error messages for
//! misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "SCANNER_CONFIG";

/// Load, override and validate the configuration.
///
/// # Arguments
/// * `path` - Explicit config file; `None` reads `config.toml` if present
/// * `env` - Environment lookup, usually `|key| std::env::var(key).ok()`
///
/// # Errors
/// Returns detailed error if:
/// - An explicit file doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
  let mut config = match path {
    Some(path) => read_config(Path::new(path))?,
    None if Path::new(DEFAULT_CONFIG_PATH).exists() => read_config(Path::new(DEFAULT_CONFIG_PATH))?,
    None => AppConfig::default(),
  };

  apply_env_overrides(&mut config, env);
  validate_config(&config)?;

  info!(
    collections = config.collections.len(),
    rpc = %config.endpoints.rpc_url,
    indexer = %config.endpoints.indexer_url,
    batch_size = config.rate_limits.batch_size,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse a config file without overrides or validation.
pub fn read_config(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
  Ok(toml::from_str(content)?)
}

/// Overwrite file values with non-empty environment values.
pub fn apply_env_overrides(config: &mut AppConfig, env: impl Fn(&str) -> Option<String>) {
  let get = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

  if let Some(v) = get("REGISTERED_FILE") {
    config.scanner.registered_file = v;
  }
  if let Some(v) = get("RESULTS_FILE") {
    config.scanner.results_file = v;
  }
  if let Some(v) = get("RPC_URL") {
    config.endpoints.rpc_url = v;
  }
  if let Some(v) = get("INDEXER_URL") {
    config.endpoints.indexer_url = v;
  }
  if let Some(v) = get("CATALOG_URL") {
    config.endpoints.catalog_url = Some(v);
  }
  if let Some(v) = get("CATALOG_API_KEY") {
    config.endpoints.catalog_api_key = Some(v);
  }
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Required input file and endpoints
/// - Catalog URL and key configured together
/// - Non-empty chain identifiers
/// - A valid, duplicate-free collection list
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.scanner.registered_file.trim().is_empty(),
    "REGISTERED_FILE must be set"
  );
  anyhow::ensure!(
    !config.endpoints.rpc_url.trim().is_empty(),
    "RPC_URL must be set"
  );
  anyhow::ensure!(
    !config.endpoints.indexer_url.trim().is_empty(),
    "INDEXER_URL must be set"
  );
  anyhow::ensure!(
    !config.scanner.results_file.trim().is_empty(),
    "results_file must not be empty"
  );

  anyhow::ensure!(
    config.endpoints.catalog_url.is_some() == config.endpoints.catalog_api_key.is_some(),
    "CATALOG_URL and CATALOG_API_KEY must be set together"
  );
  anyhow::ensure!(
    config.endpoints.timeout_seconds > 0,
    "timeout_seconds must be positive"
  );

  anyhow::ensure!(
    !config.chain.native_denom.is_empty(),
    "native_denom must not be empty"
  );
  anyhow::ensure!(
    !config.chain.marketplace_contract.is_empty(),
    "marketplace_contract must not be empty"
  );
  anyhow::ensure!(
    !config.chain.vault_contract.is_empty(),
    "vault_contract must not be empty"
  );
  anyhow::ensure!(
    !config.chain.exchange_event_namespace.is_empty(),
    "exchange_event_namespace must not be empty"
  );

  config
    .tracked_collections()
    .context("Invalid collection configuration")?;

  Ok(())
}
