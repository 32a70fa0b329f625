//! Sheet Loader - Registrant Export Reader
//!
//! Reads the spreadsheet export (`{range, majorDimension, values}`)
//! listing registrants. Row 0 is a header; column 0 carries the
//! identifier and column 1 the address.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::domain::Registrant;

/// Spreadsheet export document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub range: String,
    #[serde(default, rename = "majorDimension")]
    pub major_dimension: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl SheetData {
    /// Data rows as registrants, in sheet order.
    ///
    /// Rows with fewer than two cells are skipped. A sheet without any
    /// row past the header is an error.
    pub fn registrants(&self) -> Result<Vec<Registrant>> {
        ensure!(
            self.values.len() >= 2,
            "sheet {} has no data rows",
            if self.range.is_empty() { "<unnamed>" } else { self.range.as_str() }
        );

        let mut short_rows = 0usize;
        let registrants: Vec<Registrant> = self.values[1..]
            .iter()
            .filter_map(|row| match row.as_slice() {
                [identifier, address, ..] => Some(Registrant {
                    identifier: identifier.clone(),
                    address: address.clone(),
                }),
                _ => {
                    short_rows += 1;
                    None
                }
            })
            .collect();

        if short_rows > 0 {
            warn!(short_rows, "Skipped sheet rows without an address column");
        }

        Ok(registrants)
    }
}

/// Read and parse the registrant export at `path`.
#[instrument]
pub async fn load_registrants(path: &Path) -> Result<Vec<Registrant>> {
    let json = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read registrant file {}", path.display()))?;

    let sheet: SheetData = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse registrant file {}", path.display()))?;

    let registrants = sheet.registrants()?;
    info!(
        range = %sheet.range,
        registrants = registrants.len(),
        "Registrants loaded"
    );

    Ok(registrants)
}
