//! Eligibility Scanner - Per-Address Signal Aggregation Loop
//!
//! The main use case:
//! 1. Builds the sell-order index once (fatal on failure)
//! 2. For every registrant, folds sell-order, ownership, balance and
//!    participation signals into an `EligibilityRecord`
//! 3. Keeps records that hold at least one collection or flag
//! 4. Paces the loop in fixed-size address batches
//!
//! Addresses are processed strictly one after another. Per-address
//! lookup failures are soft: they are logged, reported to the observer
//! and replaced by the lookup's zero value.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::domain::{
  ChainRoutes, CollectionsError, EligibilityRecord, ParticipationRules, Registrant, Report,
  SellOrderIndex, Signal, TrackedCollections,
};
use crate::ports::json_source::{FetchError, JsonFetcher};
use crate::ports::observer::{Lookup, NoopObserver, ScanObserver};
use crate::ports::sleeper::Sleeper;

use super::balance::BalanceResolver;
use super::ownership::{CatalogOwnershipResolver, ContractOwnershipResolver, OwnershipResolver};
use super::pacer::BatchPacer;
use super::participation::ParticipationResolver;
use super::sell_order_index::{ScanError, SellOrderIndexBuilder};

/// Where live NFT ownership is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipSource {
  /// One smart query per tracked collection contract.
  Contracts,
  /// The NFT catalog API.
  Catalog { base_url: String, api_key: String },
}

impl OwnershipSource {
  /// The catalog when both its URL and key are configured.
  pub fn from_config(config: &AppConfig) -> Self {
    match (&config.endpoints.catalog_url, &config.endpoints.catalog_api_key) {
      (Some(base_url), Some(api_key)) => Self::Catalog {
        base_url: base_url.clone(),
        api_key: api_key.clone(),
      },
      _ => Self::Contracts,
    }
  }
}

/// Everything the scanner needs besides its adapters.
#[derive(Debug, Clone)]
pub struct ScanSettings {
  pub routes: ChainRoutes,
  pub collections: TrackedCollections,
  /// Marketplace contract holding the sell orders.
  pub marketplace_contract: String,
  pub native_denom: String,
  pub participation: ParticipationRules,
  pub ownership: OwnershipSource,
  /// Addresses per pacing batch; 0 disables pacing.
  pub batch_size: usize,
  pub batch_pause: Duration,
}

impl ScanSettings {
  /// Everything the scanner needs from the loaded configuration.
  pub fn from_config(config: &AppConfig) -> Result<Self, CollectionsError> {
    Ok(Self {
      routes: ChainRoutes::new(&config.endpoints.rpc_url, &config.endpoints.indexer_url),
      collections: config.tracked_collections()?,
      marketplace_contract: config.chain.marketplace_contract.clone(),
      native_denom: config.chain.native_denom.clone(),
      participation: ParticipationRules::new(
        config.chain.vault_contract.clone(),
        config.chain.exchange_event_namespace.clone(),
      ),
      ownership: OwnershipSource::from_config(config),
      batch_size: config.rate_limits.batch_size,
      batch_pause: Duration::from_millis(config.rate_limits.batch_pause_ms),
    })
  }
}

/// Counters describing a finished scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
  /// Input rows handed to the scanner.
  pub rows: usize,
  /// Addresses evaluated.
  pub scanned: usize,
  /// Rows skipped for a blank address.
  pub skipped_rows: usize,
  /// Records kept in the report.
  pub retained: usize,
  /// Soft lookup failures replaced by zero values.
  pub soft_failures: usize,
  pub pauses: usize,
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
}

impl ScanSummary {
  pub fn elapsed_ms(&self) -> i64 {
    (self.finished_at - self.started_at).num_milliseconds()
  }
}

/// Result of a successful scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
  pub report: Report,
  pub summary: ScanSummary,
}

/// Eligibility scanner orchestrating the resolvers over a registrant list.
pub struct EligibilityScanner<F: JsonFetcher, S: Sleeper> {
  /// Bulk sell-order reader.
  index_builder: SellOrderIndexBuilder<F>,
  /// Tracked collections, shared with the ownership resolver.
  collections: Arc<TrackedCollections>,
  ownership: OwnershipResolver<F>,
  balance: BalanceResolver<F>,
  participation: ParticipationResolver<F>,
  sleeper: Arc<S>,
  batch_size: usize,
  batch_pause: Duration,
  observer: Arc<dyn ScanObserver>,
}

impl<F: JsonFetcher, S: Sleeper> EligibilityScanner<F, S> {
  /// Create a new scanner.
  pub fn new(fetcher: Arc<F>, sleeper: Arc<S>, settings: ScanSettings) -> Self {
    let ScanSettings {
      routes,
      collections,
      marketplace_contract,
      native_denom,
      participation,
      ownership,
      batch_size,
      batch_pause,
    } = settings;

    let collections = Arc::new(collections);

    let ownership = match ownership {
      OwnershipSource::Contracts => OwnershipResolver::Contracts(ContractOwnershipResolver::new(
        Arc::clone(&fetcher),
        routes.clone(),
        Arc::clone(&collections),
      )),
      OwnershipSource::Catalog { base_url, api_key } => {
        OwnershipResolver::Catalog(CatalogOwnershipResolver::new(
          Arc::clone(&fetcher),
          routes.clone().with_catalog(&base_url),
          Arc::clone(&collections),
          api_key,
        ))
      }
    };

    Self {
      index_builder: SellOrderIndexBuilder::new(
        Arc::clone(&fetcher),
        routes.clone(),
        marketplace_contract,
      ),
      collections,
      ownership,
      balance: BalanceResolver::new(Arc::clone(&fetcher), routes.clone(), native_denom),
      participation: ParticipationResolver::new(fetcher, routes, participation),
      sleeper,
      batch_size,
      batch_pause,
      observer: Arc::new(NoopObserver),
    }
  }

  /// Report progress to `observer` instead of discarding it.
  pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
    self.observer = observer;
    self
  }

  /// Read the marketplace once and index its sell orders by owner.
  pub async fn build_index(&self) -> Result<SellOrderIndex, ScanError> {
    self.index_builder.build().await
  }

  /// Evaluate one address against a prebuilt index.
  ///
  /// Never fails: a failed lookup contributes its zero value.
  pub async fn evaluate(&self, address: &str, index: &SellOrderIndex) -> EligibilityRecord {
    self.evaluate_counted(address, index).await.0
  }

  /// Evaluate one address, also returning the number of soft failures.
  #[instrument(skip(self, index))]
  async fn evaluate_counted(&self, address: &str, index: &SellOrderIndex) -> (EligibilityRecord, usize) {
    let mut record = EligibilityRecord::new(address);
    let mut failures = 0;

    let listed = index.listed_collections(address, &self.collections);
    if !listed.is_empty() {
      debug!(collections = ?listed, "Sell-order match");
    }
    record.apply(Signal::SellOrderMatch(listed));

    // Collections matched through listings are not queried live.
    if record.collections.len() < self.collections.len() {
      match self.ownership.resolve(address, &record.collections).await {
        Ok(owned) => record.apply(Signal::NftOwnership(owned)),
        Err(e) => {
          self.soft_failure(address, self.ownership.lookup(), &e);
          failures += 1;
        }
      }
    }

    match self.balance.resolve(address).await {
      Ok(amount) => record.apply(Signal::NativeBalance(amount)),
      Err(e) => {
        self.soft_failure(address, Lookup::Balance, &e);
        failures += 1;
      }
    }

    if record.participation_gate_open() {
      match self.participation.resolve(address).await {
        Ok(found) => {
          record.apply(Signal::ExchangeParticipation(found.exchange));
          record.apply(Signal::VaultParticipation(found.vault));
        }
        Err(e) => {
          self.soft_failure(address, Lookup::Participation, &e);
          failures += 1;
        }
      }
    }

    (record, failures)
  }

  fn soft_failure(&self, address: &str, lookup: Lookup, error: &FetchError) {
    warn!(
      address = %address,
      lookup = %lookup,
      error = %error,
      "Lookup failed, using zero value"
    );
    self.observer.lookup_failed(lookup);
  }

  /// Scan every registrant and collect the retained records.
  ///
  /// Only a failed sell-order index aborts the run.
  #[instrument(skip(self, registrants), fields(rows = registrants.len()), name = "eligibility_scan")]
  pub async fn run(&self, registrants: &[Registrant]) -> Result<ScanOutcome, ScanError> {
    let started_at = Utc::now();
    info!(
      rows = registrants.len(),
      collections = self.collections.len(),
      ownership = %self.ownership.lookup(),
      "Starting eligibility scan"
    );

    let index = self.build_index().await?;

    let addresses: Vec<&str> = registrants
      .iter()
      .filter_map(|row| {
        let address = row.address.trim();
        if address.is_empty() {
          warn!(identifier = %row.identifier, "Skipping row without address");
          None
        } else {
          Some(address)
        }
      })
      .collect();
    let skipped_rows = registrants.len() - addresses.len();

    let mut pacer = BatchPacer::new(Arc::clone(&self.sleeper), self.batch_size, self.batch_pause);
    let mut report = Report::default();
    let mut soft_failures = 0;

    for (position, address) in addresses.iter().enumerate() {
      let (record, failures) = self.evaluate_counted(address, &index).await;
      soft_failures += failures;
      self.observer.address_scanned();

      if record.is_eligible() {
        info!(
          address = %record.address,
          collections = ?record.collections,
          exchange = record.exchange_flag,
          vault = record.vault_flag,
          "Eligible"
        );
        self.observer.record_retained(&record);
        report.push(record);
      } else {
        debug!(address = %record.address, "Not eligible, dropped");
      }

      pacer.address_done(position + 1 < addresses.len()).await;
    }

    let summary = ScanSummary {
      rows: registrants.len(),
      scanned: addresses.len(),
      skipped_rows,
      retained: report.len(),
      soft_failures,
      pauses: pacer.pauses(),
      started_at,
      finished_at: Utc::now(),
    };

    info!(
      scanned = summary.scanned,
      retained = summary.retained,
      soft_failures = summary.soft_failures,
      elapsed_ms = summary.elapsed_ms(),
      "Eligibility scan complete"
    );

    Ok(ScanOutcome { report, summary })
  }
}
