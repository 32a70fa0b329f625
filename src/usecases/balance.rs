//! Balance Use Case - Native Token Balance Lookup
//!
//! Reads the bank balances of an address and extracts the native
//! denomination. The result gates the (expensive) participation lookup.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::ChainRoutes;
use crate::domain::wire::BalancesResponse;
use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest, fetch_typed};

pub struct BalanceResolver<F: JsonFetcher> {
  fetcher: Arc<F>,
  routes: ChainRoutes,
  denom: String,
}

impl<F: JsonFetcher> BalanceResolver<F> {
  pub fn new(fetcher: Arc<F>, routes: ChainRoutes, denom: impl Into<String>) -> Self {
    Self {
      fetcher,
      routes,
      denom: denom.into(),
    }
  }

  /// Native balance of `address` in base units; 0 when the listing has none.
  #[instrument(skip(self))]
  pub async fn resolve(&self, address: &str) -> Result<u128, FetchError> {
    let request = JsonRequest::get(self.routes.balances(address));
    let response: BalancesResponse = fetch_typed(self.fetcher.as_ref(), &request).await?;
    let amount = response.native_amount(&self.denom);
    debug!(denom = %self.denom, amount = %amount, "Balance resolved");
    Ok(amount)
  }
}
