//! Scan Observer Port - Progress and Failure Reporting
//!
//! The scanner reports what happens per address through this trait.
//! The metrics adapter turns these calls into Prometheus counters; runs
//! without metrics use [`NoopObserver`].

use crate::domain::EligibilityRecord;

/// Remote lookups whose failure the scanner tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
  /// Per-contract `tokens { owner }` smart queries.
  Ownership,
  /// Catalog API token listing.
  Catalog,
  /// Bank balances.
  Balance,
  /// Explorer transaction history.
  Participation,
}

impl Lookup {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Ownership => "ownership",
      Self::Catalog => "catalog",
      Self::Balance => "balance",
      Self::Participation => "participation",
    }
  }
}

impl std::fmt::Display for Lookup {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Receives scan progress. All methods default to doing nothing.
pub trait ScanObserver: Send + Sync {
  /// An address finished evaluation, retained or not.
  fn address_scanned(&self) {}

  /// A soft lookup failed and its zero value was used instead.
  fn lookup_failed(&self, _lookup: Lookup) {}

  /// A record passed the retention rule.
  fn record_retained(&self, _record: &EligibilityRecord) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
