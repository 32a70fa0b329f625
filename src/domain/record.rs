//! Eligibility signals and the per-address record they build up.

use serde::{Deserialize, Serialize};

use super::collection::{Address, CollectionName};

/// One registration row from the input sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    /// Free-form identifier (usually the registrant's e-mail).
    pub identifier: String,
    /// Address to evaluate.
    pub address: Address,
}

/// A normalized observation from one resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Collections the address holds tokens of (live contract or catalog query).
    NftOwnership(Vec<CollectionName>),
    /// Collections the address has an open marketplace listing for.
    SellOrderMatch(Vec<CollectionName>),
    /// Native token balance in base units.
    NativeBalance(u128),
    /// Interaction with the exchange module.
    ExchangeParticipation(bool),
    /// Interaction with the vault manager contract.
    VaultParticipation(bool),
}

/// Aggregated eligibility for one address.
///
/// Starts empty and only ever grows while its address is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub address: Address,
    /// Native balance in base units.
    #[serde(default)]
    pub balance: u128,
    /// Matched collections, deduplicated, in discovery order.
    #[serde(default)]
    pub collections: Vec<CollectionName>,
    #[serde(default)]
    pub exchange_flag: bool,
    #[serde(default)]
    pub vault_flag: bool,
}

impl EligibilityRecord {
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
            balance: 0,
            collections: Vec::new(),
            exchange_flag: false,
            vault_flag: false,
        }
    }

    /// Fold a signal into the record.
    pub fn apply(&mut self, signal: Signal) {
        match signal {
            Signal::NftOwnership(names) | Signal::SellOrderMatch(names) => {
                for name in names {
                    self.add_collection(name);
                }
            }
            Signal::NativeBalance(amount) => self.balance = amount,
            Signal::ExchangeParticipation(flag) => self.exchange_flag |= flag,
            Signal::VaultParticipation(flag) => self.vault_flag |= flag,
        }
    }

    fn add_collection(&mut self, name: CollectionName) {
        if !self.collections.contains(&name) {
            self.collections.push(name);
        }
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.iter().any(|c| c == name)
    }

    /// Participation is only looked up for funded addresses.
    pub fn participation_gate_open(&self) -> bool {
        self.balance > 0
    }

    /// Whether the record belongs in the report. Balance alone does not count.
    pub fn is_eligible(&self) -> bool {
        !self.collections.is_empty() || self.exchange_flag || self.vault_flag
    }
}
