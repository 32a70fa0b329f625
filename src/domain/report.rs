//! The scan report and its output shapes.

use serde::{Deserialize, Serialize};

use super::record::EligibilityRecord;

/// Shape of the output artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// `["inj1...", ...]`
    Addresses,
    /// `[{"address", "collections"}, ...]`
    Collections,
    /// `[{"address", "balance", "collections", "exchange_flag", "vault_flag"}, ...]`
    #[default]
    Full,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Addresses => write!(f, "addresses"),
            Self::Collections => write!(f, "collections"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Retained records in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    records: Vec<EligibilityRecord>,
}

/// Borrowed view of a report in one output shape.
///
/// Serialized directly rather than through `serde_json::Value`, which
/// cannot hold balances above `u64::MAX`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RenderedReport<'a> {
    Addresses(Vec<&'a str>),
    Collections(Vec<CollectionsEntry<'a>>),
    Full(&'a [EligibilityRecord]),
}

#[derive(Debug, Serialize)]
pub struct CollectionsEntry<'a> {
    pub address: &'a str,
    pub collections: &'a [String],
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EligibilityRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[EligibilityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn render(&self, format: ReportFormat) -> RenderedReport<'_> {
        match format {
            ReportFormat::Addresses => {
                RenderedReport::Addresses(self.records.iter().map(|r| r.address.as_str()).collect())
            }
            ReportFormat::Collections => RenderedReport::Collections(
                self.records
                    .iter()
                    .map(|r| CollectionsEntry {
                        address: &r.address,
                        collections: &r.collections,
                    })
                    .collect(),
            ),
            ReportFormat::Full => RenderedReport::Full(&self.records),
        }
    }
}

impl From<Vec<EligibilityRecord>> for Report {
    fn from(records: Vec<EligibilityRecord>) -> Self {
        Self { records }
    }
}
