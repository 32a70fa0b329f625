//! Sell-order index: owner address → contracts with an open listing.
//!
//! Built once per run from the marketplace's `all_sell_orders` query
//! and only read afterwards. An address is a key iff it owns at least
//! one open sell order.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

use super::collection::{Address, CollectionName, ContractAddress, TrackedCollections};

/// One open marketplace listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SellOrder {
    pub owner: Address,
    pub contract_address: ContractAddress,
}

impl SellOrder {
    fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.contract_address.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellOrderIndex {
    listings: HashMap<Address, HashSet<ContractAddress>>,
}

impl SellOrderIndex {
    /// Index raw order entries, skipping the malformed ones.
    ///
    /// Returns the index and how many entries were skipped.
    pub fn from_raw_orders(raw: Vec<Value>) -> (Self, usize) {
        let mut skipped = 0;
        let index = raw
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<SellOrder>(entry) {
                Ok(order) if order.is_complete() => Some(order),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        (index, skipped)
    }

    /// Contracts the owner has listed, if any.
    pub fn listed_contracts(&self, owner: &str) -> Option<&HashSet<ContractAddress>> {
        self.listings.get(owner)
    }

    /// Names of the tracked collections the owner has listed, in tracked order.
    pub fn listed_collections(
        &self,
        owner: &str,
        tracked: &TrackedCollections,
    ) -> Vec<CollectionName> {
        let Some(contracts) = self.listings.get(owner) else {
            return Vec::new();
        };
        tracked
            .iter()
            .filter(|c| contracts.contains(&c.contract_address))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Number of distinct owners.
    pub fn owner_count(&self) -> usize {
        self.listings.len()
    }

    /// Number of distinct (owner, contract) pairs.
    pub fn order_count(&self) -> usize {
        self.listings.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl FromIterator<SellOrder> for SellOrderIndex {
    fn from_iter<I: IntoIterator<Item = SellOrder>>(orders: I) -> Self {
        let mut listings: HashMap<Address, HashSet<ContractAddress>> = HashMap::new();
        for order in orders {
            listings
                .entry(order.owner)
                .or_default()
                .insert(order.contract_address);
        }
        Self { listings }
    }
}
