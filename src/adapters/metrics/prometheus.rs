//! Prometheus Metrics Registry - Scan Observability
//!
//! Counts scanned addresses, retained records, signal hits and soft
//! lookup failures. A scan is a batch job, so the registry is written
//! once at the end of the run in the text exposition format for a
//! node-exporter textfile collector instead of being served.

use std::path::Path;

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tokio::fs;
use tracing::{info, instrument};

use crate::domain::EligibilityRecord;
use crate::ports::observer::{Lookup, ScanObserver};

/// Centralized Prometheus metrics for the scanner.
///
/// All metrics follow the naming convention `eligibility_scanner_*`.
pub struct ScanMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Addresses evaluated.
    pub addresses_scanned: IntCounter,
    /// Records kept in the report.
    pub records_retained: IntCounter,
    /// Retained signals by kind (`collection`, `exchange`, `vault`).
    pub signal_hits: IntCounterVec,
    /// Retained records per collection name.
    pub collection_hits: IntCounterVec,
    /// Soft lookup failures by lookup.
    pub lookup_failures: IntCounterVec,
}

impl ScanMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let addresses_scanned = IntCounter::new(
            "eligibility_scanner_addresses_scanned_total",
            "Total addresses evaluated",
        )?;

        let records_retained = IntCounter::new(
            "eligibility_scanner_records_retained_total",
            "Total addresses kept in the report",
        )?;

        let signal_hits = IntCounterVec::new(
            Opts::new(
                "eligibility_scanner_signal_hits_total",
                "Retained records carrying each signal kind",
            ),
            &["signal"],
        )?;

        let collection_hits = IntCounterVec::new(
            Opts::new(
                "eligibility_scanner_collection_hits_total",
                "Retained records matching each tracked collection",
            ),
            &["collection"],
        )?;

        let lookup_failures = IntCounterVec::new(
            Opts::new(
                "eligibility_scanner_lookup_failures_total",
                "Soft lookup failures replaced by zero values",
            ),
            &["lookup"],
        )?;

        registry.register(Box::new(addresses_scanned.clone()))?;
        registry.register(Box::new(records_retained.clone()))?;
        registry.register(Box::new(signal_hits.clone()))?;
        registry.register(Box::new(collection_hits.clone()))?;
        registry.register(Box::new(lookup_failures.clone()))?;

        Ok(Self {
            registry,
            addresses_scanned,
            records_retained,
            signal_hits,
            collection_hits,
            lookup_failures,
        })
    }

    /// Render every registered metric in the text exposition format.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics are not valid UTF-8")
    }

    /// Write the metrics to `path` for a textfile collector.
    #[instrument(skip(self))]
    pub async fn write_textfile(&self, path: &Path) -> Result<()> {
        let text = self.encode()?;
        fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        info!(path = %path.display(), "Metrics written");
        Ok(())
    }
}

impl ScanObserver for ScanMetrics {
    fn address_scanned(&self) {
        self.addresses_scanned.inc();
    }

    fn lookup_failed(&self, lookup: Lookup) {
        self.lookup_failures
            .with_label_values(&[lookup.as_str()])
            .inc();
    }

    fn record_retained(&self, record: &EligibilityRecord) {
        self.records_retained.inc();

        if !record.collections.is_empty() {
            self.signal_hits.with_label_values(&["collection"]).inc();
        }
        for name in &record.collections {
            self.collection_hits.with_label_values(&[name.as_str()]).inc();
        }
        if record.exchange_flag {
            self.signal_hits.with_label_values(&["exchange"]).inc();
        }
        if record.vault_flag {
            self.signal_hits.with_label_values(&["vault"]).inc();
        }
    }
}
