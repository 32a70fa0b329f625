//! Protocol participation detection from an account's transaction history.
//!
//! Two independent flags come out of a single pass:
//! - vault: the first message of some transaction targets the vault
//!   manager contract;
//! - exchange: some transaction log carries an event from the exchange
//!   module namespace.
//!
//! A flag stops being evaluated once set; the pass stops once both are.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire::TxRecord;

/// Participation flags for one address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub exchange: bool,
    pub vault: bool,
}

impl Participation {
    pub fn is_complete(&self) -> bool {
        self.exchange && self.vault
    }
}

/// What counts as participation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationRules {
    /// Vault manager contract address.
    pub vault_contract: String,
    /// Substring identifying exchange module event types.
    pub exchange_namespace: String,
}

impl ParticipationRules {
    pub fn new(vault_contract: impl Into<String>, exchange_namespace: impl Into<String>) -> Self {
        Self {
            vault_contract: vault_contract.into(),
            exchange_namespace: exchange_namespace.into(),
        }
    }

    /// Scan transactions in order until both flags are known.
    pub fn scan(&self, txs: &[TxRecord]) -> Participation {
        let mut found = Participation::default();

        for tx in txs {
            if !found.vault && self.targets_vault(tx) {
                found.vault = true;
            }
            if !found.exchange && self.emits_exchange_event(tx) {
                found.exchange = true;
            }
            if found.is_complete() {
                break;
            }
        }

        found
    }

    fn targets_vault(&self, tx: &TxRecord) -> bool {
        tx.messages
            .first()
            .and_then(message_contract)
            .is_some_and(|contract| contract == self.vault_contract)
    }

    fn emits_exchange_event(&self, tx: &TxRecord) -> bool {
        tx.logs
            .iter()
            .flat_map(|log| &log.events)
            .any(|event| event.kind.contains(&self.exchange_namespace))
    }
}

/// Contract targeted by an explorer message.
///
/// The explorer nests the decoded message under `value`; flattened
/// encodings carry the field at the top level.
fn message_contract(message: &Value) -> Option<&str> {
    message
        .get("value")
        .and_then(|value| value.get("contract_address"))
        .or_else(|| message.get("contract_address"))
        .and_then(Value::as_str)
}
