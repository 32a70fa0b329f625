//! Participation Use Case - Exchange and Vault Activity Lookup
//!
//! Fetches an address's transaction history from the explorer indexer
//! and derives both participation flags in a single pass.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::wire::AccountTxsResponse;
use crate::domain::{ChainRoutes, Participation, ParticipationRules};
use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest, fetch_typed};

pub struct ParticipationResolver<F: JsonFetcher> {
  fetcher: Arc<F>,
  routes: ChainRoutes,
  rules: ParticipationRules,
}

impl<F: JsonFetcher> ParticipationResolver<F> {
  pub fn new(fetcher: Arc<F>, routes: ChainRoutes, rules: ParticipationRules) -> Self {
    Self {
      fetcher,
      routes,
      rules,
    }
  }

  #[instrument(skip(self))]
  pub async fn resolve(&self, address: &str) -> Result<Participation, FetchError> {
    let request = JsonRequest::get(self.routes.account_txs(address));
    let response: AccountTxsResponse = fetch_typed(self.fetcher.as_ref(), &request).await?;
    let found = self.rules.scan(&response.data);
    debug!(
      txs = response.data.len(),
      exchange = found.exchange,
      vault = found.vault,
      "Participation resolved"
    );
    Ok(found)
  }
}
