//! Tracked NFT collections.
//!
//! A collection is identified by its contract address and reported by
//! its display name. The tracked set is an explicit ordered mapping
//! built once from configuration and shared read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-chain account identifier (bech32 string, compared verbatim).
pub type Address = String;

/// Contract address of an NFT collection.
pub type ContractAddress = String;

/// Human-readable collection name as it appears in reports.
pub type CollectionName = String;

/// A single tracked collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection contract address.
    pub contract_address: ContractAddress,
    /// Display name written to the report.
    pub name: CollectionName,
    /// Family name used by the NFT catalog API, when it differs from `name`.
    #[serde(default)]
    pub catalog_family: Option<String>,
}

impl Collection {
    pub fn new(contract_address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            name: name.into(),
            catalog_family: None,
        }
    }

    /// Family name to match against catalog tokens.
    pub fn catalog_family(&self) -> &str {
        self.catalog_family.as_deref().unwrap_or(&self.name)
    }
}

/// Reasons a tracked collection list is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionsError {
    #[error("at least one collection must be tracked")]
    Empty,

    #[error("collection #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("contract {0} is tracked more than once")]
    DuplicateContract(String),

    #[error("collection name {0} is used more than once")]
    DuplicateName(String),
}

/// Ordered, validated mapping contract address → collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedCollections {
    entries: Vec<Collection>,
}

impl TrackedCollections {
    /// Validate and freeze a collection list.
    pub fn new(entries: Vec<Collection>) -> Result<Self, CollectionsError> {
        if entries.is_empty() {
            return Err(CollectionsError::Empty);
        }

        let mut contracts = HashSet::with_capacity(entries.len());
        let mut names = HashSet::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.contract_address.trim().is_empty() {
                return Err(CollectionsError::EmptyField {
                    index,
                    field: "contract_address",
                });
            }
            if entry.name.trim().is_empty() {
                return Err(CollectionsError::EmptyField { index, field: "name" });
            }
            if !contracts.insert(entry.contract_address.as_str()) {
                return Err(CollectionsError::DuplicateContract(
                    entry.contract_address.clone(),
                ));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(CollectionsError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a collection by contract address.
    pub fn get(&self, contract_address: &str) -> Option<&Collection> {
        self.entries
            .iter()
            .find(|c| c.contract_address == contract_address)
    }

    /// Display name for a contract address, if it is tracked.
    pub fn name_of(&self, contract_address: &str) -> Option<&str> {
        self.get(contract_address).map(|c| c.name.as_str())
    }
}

impl<'a> IntoIterator for &'a TrackedCollections {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_contract() {
        let tracked = TrackedCollections::new(vec![
            Collection::new("inj1quant", "quant"),
            Collection::new("inj1ninja", "ninja"),
        ])
        .unwrap();

        assert_eq!(tracked.name_of("inj1ninja"), Some("ninja"));
        assert_eq!(tracked.name_of("inj1other"), None);
        let order: Vec<_> = tracked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, ["quant", "ninja"]);
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        assert_eq!(
            TrackedCollections::new(Vec::new()),
            Err(CollectionsError::Empty)
        );
        assert_eq!(
            TrackedCollections::new(vec![
                Collection::new("inj1a", "a"),
                Collection::new("inj1a", "b"),
            ]),
            Err(CollectionsError::DuplicateContract("inj1a".into()))
        );
        assert_eq!(
            TrackedCollections::new(vec![
                Collection::new("inj1a", "a"),
                Collection::new("inj1b", "a"),
            ]),
            Err(CollectionsError::DuplicateName("a".into()))
        );
        assert_eq!(
            TrackedCollections::new(vec![Collection::new(" ", "a")]),
            Err(CollectionsError::EmptyField {
                index: 0,
                field: "contract_address"
            })
        );
    }

    #[test]
    fn test_catalog_family_defaults_to_name() {
        let mut c = Collection::new("inj1a", "Quants");
        assert_eq!(c.catalog_family(), "Quants");
        c.catalog_family = Some("Injective Quants".into());
        assert_eq!(c.catalog_family(), "Injective Quants");
    }
}
