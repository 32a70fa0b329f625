//! Wire shapes of the remote JSON responses.
//!
//! Every response is decoded in one typed step. Fields the remote side
//! may omit, null out, or send with the wrong type go through
//! [`lenient`] / [`lenient_list`], which turn them into empty values
//! instead of failing the whole decode.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

/// Decode a field, falling back to `T::default()` when it is absent,
/// null, or not shaped like `T`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Decode a list field, dropping entries that are not shaped like `T`.
///
/// A missing or non-array field decodes as an empty list.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// ────────────────────────────────────────────
// Marketplace: all_sell_orders
// ────────────────────────────────────────────

/// `{"data": {"orders": [...]}}` from the marketplace contract.
///
/// `data` is mandatory: a body without it is not a sell-order listing.
/// Individual orders stay raw so the index builder can count the ones
/// it has to skip.
#[derive(Debug, Clone, Deserialize)]
pub struct SellOrdersResponse {
    pub data: SellOrdersData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellOrdersData {
    #[serde(default, deserialize_with = "lenient")]
    pub orders: Vec<Value>,
}

// ────────────────────────────────────────────
// NFT contract: tokens { owner }
// ────────────────────────────────────────────

/// `{"data": {"ids": [...]}}` from a cw721-style collection contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedTokensResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<OwnedTokens>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedTokens {
    #[serde(default, deserialize_with = "lenient")]
    pub ids: Vec<Value>,
}

// ────────────────────────────────────────────
// Bank module: balances
// ────────────────────────────────────────────

/// `{"balances": [{"denom", "amount"}, ...]}` from the bank module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalancesResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub balances: Vec<Coin>,
}

/// One balance entry. `amount` is kept raw: a mistyped amount on the
/// native entry must resolve to zero, not skip to a later entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(default)]
    pub amount: Value,
}

// ────────────────────────────────────────────
// Explorer indexer: accountTxs
// ────────────────────────────────────────────

/// `{"data": [{"messages": [...], "logs": [...]}, ...]}` from the explorer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountTxsResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub data: Vec<TxRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxRecord {
    /// Raw messages; only the first one is inspected, so entries are
    /// never dropped here (dropping would shift what "first" means).
    #[serde(default, deserialize_with = "lenient")]
    pub messages: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub logs: Vec<TxLog>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxLog {
    #[serde(default, deserialize_with = "lenient_list")]
    pub events: Vec<TxEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxEvent {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: String,
}

// ────────────────────────────────────────────
// NFT catalog (API key): tokens/{address}
// ────────────────────────────────────────────

/// `{"tokens": [{"family": {"name"}}, ...]}` from the catalog API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogTokensResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub tokens: Vec<CatalogToken>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogToken {
    #[serde(default, deserialize_with = "lenient")]
    pub family: Option<TokenFamily>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenFamily {
    pub name: String,
}
