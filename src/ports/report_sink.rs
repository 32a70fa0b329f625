//! Report Sink Port - Output Artifact Interface
//!
//! The finished report is handed over exactly once, after the scan
//! completes. Implementations must leave no partial artifact behind
//! when saving fails.

use async_trait::async_trait;

use crate::domain::{EligibilityRecord, Report};

#[async_trait]
pub trait ReportSink: Send + Sync + 'static {
  /// Persist the finished report.
  async fn save(&self, report: &Report) -> anyhow::Result<()>;

  /// Read a previously saved full-format report back into records.
  async fn load(&self) -> anyhow::Result<Vec<EligibilityRecord>>;
}
