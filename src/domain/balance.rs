//! Native balance extraction from a bank `balances` listing.

use super::wire::{BalancesResponse, Coin};

/// Amount held in `denom`, in base units.
///
/// The first entry carrying `denom` decides. Anything unexpected on that
/// entry (non-string or non-numeric amount) yields 0, as does a listing
/// without the denomination: callers cannot tell "no data" from a zero
/// balance, and do not need to.
pub fn native_amount(coins: &[Coin], denom: &str) -> u128 {
    coins
        .iter()
        .find(|coin| coin.denom == denom)
        .and_then(|coin| coin.amount.as_str())
        .and_then(|amount| amount.parse::<u128>().ok())
        .unwrap_or(0)
}

impl BalancesResponse {
    pub fn native_amount(&self, denom: &str) -> u128 {
        native_amount(&self.balances, denom)
    }
}
