//! Sell-Order Index Use Case - One Bulk Marketplace Read
//!
//! Fetches every open sell order from the marketplace contract once
//! per run and indexes it by owner. Unlike the per-address lookups this
//! read is mandatory: without it sell-order membership cannot be
//! evaluated, so any failure aborts the scan.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::routes::all_sell_orders_query;
use crate::domain::wire::SellOrdersResponse;
use crate::domain::{ChainRoutes, SellOrderIndex};
use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest, fetch_typed};

/// Errors that end a scan.
#[derive(Debug, Error)]
pub enum ScanError {
  #[error("cannot build the sell-order index")]
  SellOrders(#[source] FetchError),
}

/// Builds the [`SellOrderIndex`] from the marketplace contract.
pub struct SellOrderIndexBuilder<F: JsonFetcher> {
  fetcher: Arc<F>,
  routes: ChainRoutes,
  marketplace_contract: String,
}

impl<F: JsonFetcher> SellOrderIndexBuilder<F> {
  pub fn new(fetcher: Arc<F>, routes: ChainRoutes, marketplace_contract: impl Into<String>) -> Self {
    Self {
      fetcher,
      routes,
      marketplace_contract: marketplace_contract.into(),
    }
  }

  /// Fetch all open sell orders and index them by owner.
  ///
  /// Malformed orders are skipped; an empty listing yields an empty
  /// index. Transport, status and decode failures are fatal.
  #[instrument(skip(self), fields(marketplace = %self.marketplace_contract))]
  pub async fn build(&self) -> Result<SellOrderIndex, ScanError> {
    let request = JsonRequest::get(
      self
        .routes
        .smart_query(&self.marketplace_contract, &all_sell_orders_query()),
    );

    let response: SellOrdersResponse = fetch_typed(self.fetcher.as_ref(), &request)
      .await
      .map_err(ScanError::SellOrders)?;

    let (index, skipped) = SellOrderIndex::from_raw_orders(response.data.orders);
    if skipped > 0 {
      warn!(skipped, "Skipped malformed sell orders");
    }

    info!(
      owners = index.owner_count(),
      listings = index.order_count(),
      "Sell-order index built"
    );

    Ok(index)
  }
}
