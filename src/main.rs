//! Injective Eligibility Scanner - Entry Point
//!
//! Runs one scan over the registrant sheet and writes the report.
//!
//! Wiring sequence:
//! 1. Load `.env`, then config.toml (path from SCANNER_CONFIG) + env overrides + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Remove any previous report, then load registrants from REGISTERED_FILE
//! 4. Create HttpJsonClient (timeout + optional request quota)
//! 5. Create ScanMetrics when metrics_path is set
//! 6. Run EligibilityScanner (sell-order index, then per-address loop)
//! 7. Save the report atomically, then the metrics textfile

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use injective_eligibility_scanner::adapters::http::{HttpClientConfig, HttpJsonClient, TokioSleeper};
use injective_eligibility_scanner::adapters::metrics::ScanMetrics;
use injective_eligibility_scanner::adapters::persistence::{ReportStore, load_registrants};
use injective_eligibility_scanner::config::loader::{CONFIG_PATH_VAR, load_config};
use injective_eligibility_scanner::ports::observer::{NoopObserver, ScanObserver};
use injective_eligibility_scanner::ports::report_sink::ReportSink;
use injective_eligibility_scanner::usecases::{EligibilityScanner, ScanSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    dotenv::dotenv().ok();

    let config_path = std::env::var(CONFIG_PATH_VAR).ok();
    let config = load_config(config_path.as_deref(), |key| std::env::var(key).ok())
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.scanner.log_level)),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        collections = config.collections.len(),
        format = %config.scanner.report_format,
        "Starting Injective eligibility scanner"
    );

    // ── 3. Load registrants ─────────────────────────────────
    let store = ReportStore::new(&config.scanner.results_file, config.scanner.report_format);
    store.clear().await?;

    let registrants = load_registrants(Path::new(&config.scanner.registered_file))
        .await
        .context("Failed to load registrants")?;

    // ── 4. Create HTTP client ───────────────────────────────
    let client = Arc::new(
        HttpJsonClient::new(HttpClientConfig {
            timeout: config.timeout(),
            requests_per_second: config.endpoints.requests_per_second,
        })
        .context("Failed to create HTTP client")?,
    );

    // ── 5. Metrics (optional) ───────────────────────────────
    let metrics = match &config.scanner.metrics_path {
        Some(_) => Some(Arc::new(ScanMetrics::new().context("Failed to register metrics")?)),
        None => None,
    };
    let observer: Arc<dyn ScanObserver> = match &metrics {
        Some(metrics) => Arc::clone(metrics) as Arc<dyn ScanObserver>,
        None => Arc::new(NoopObserver),
    };

    // ── 6. Run the scan ─────────────────────────────────────
    let settings = ScanSettings::from_config(&config)
        .context("Invalid collection configuration")?;
    let scanner = EligibilityScanner::new(client, Arc::new(TokioSleeper), settings).with_observer(observer);

    let outcome = scanner
        .run(&registrants)
        .await
        .context("Eligibility scan failed")?;

    // ── 7. Persist results ──────────────────────────────────
    store
        .save(&outcome.report)
        .await
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    if let (Some(metrics), Some(path)) = (&metrics, &config.scanner.metrics_path) {
        metrics.write_textfile(Path::new(path)).await?;
    }

    let summary = &outcome.summary;
    info!(
        rows = summary.rows,
        scanned = summary.scanned,
        skipped_rows = summary.skipped_rows,
        retained = summary.retained,
        soft_failures = summary.soft_failures,
        pauses = summary.pauses,
        started_at = %summary.started_at.to_rfc3339(),
        elapsed_ms = summary.elapsed_ms(),
        results = %store.path().display(),
        "Scan complete"
    );

    Ok(())
}
