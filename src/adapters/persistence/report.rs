//! Report Store - Atomic JSON Report Artifact
//!
//! Saves the finished report using atomic writes (write to tmp file,
//! then rename), so the artifact is either absent or complete. Output
//! is pretty-printed with a 4-space indent and a trailing newline.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::domain::{EligibilityRecord, Report, ReportFormat};
use crate::ports::report_sink::ReportSink;

/// File-backed report sink.
pub struct ReportStore {
    /// Final artifact path.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
    format: ReportFormat,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>, format: ReportFormat) -> Self {
        let path = path.into();
        let mut tmp: OsString = path.clone().into_os_string();
        tmp.push(".tmp");

        Self {
            path,
            tmp_path: PathBuf::from(tmp),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove an artifact left by an earlier run, and its tmp file.
    ///
    /// Called before scanning so a failed run leaves no report behind.
    /// A missing file is not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn clear(&self) -> Result<()> {
        for path in [&self.path, &self.tmp_path] {
            match fs::remove_file(path).await {
                Ok(()) => debug!(removed = %path.display(), "Removed previous report file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        Ok(())
    }

    /// Serialize `report` in the configured format.
    pub fn encode(&self, report: &Report) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        report
            .render(self.format)
            .serialize(&mut serializer)
            .context("Failed to serialize report")?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

#[async_trait]
impl ReportSink for ReportStore {
    #[instrument(skip(self, report), fields(path = %self.path.display(), format = %self.format))]
    async fn save(&self, report: &Report) -> Result<()> {
        let bytes = self.encode(report)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .context("Failed to create report directory")?;
        }

        fs::write(&self.tmp_path, &bytes)
            .await
            .context("Failed to write tmp report file")?;

        fs::rename(&self.tmp_path, &self.path)
            .await
            .context("Failed to rename report file")?;

        info!(records = report.len(), bytes = bytes.len(), "Report saved");

        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<EligibilityRecord>> {
        if self.format != ReportFormat::Full {
            bail!("only the full report format can be loaded, store uses {}", self.format);
        }

        let json = fs::read_to_string(&self.path)
            .await
            .context("Failed to read report file")?;

        let records: Vec<EligibilityRecord> =
            serde_json::from_str(&json).context("Failed to parse report JSON")?;

        info!(records = records.len(), "Report loaded");

        Ok(records)
    }
}
