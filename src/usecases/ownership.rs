//! Ownership Use Case - Live NFT Holdings Lookup
//!
//! Two interchangeable sources:
//! - `Contracts`: one `tokens { owner }` smart query per tracked
//!   collection contract, against the chain REST endpoint;
//! - `Catalog`: a single token listing from the NFT catalog API,
//!   authenticated with a static `x-api-key` header.
//!
//! Collections already matched through the sell-order index are not
//! queried again.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::ownership::tokens_query;
use crate::domain::wire::{CatalogTokensResponse, OwnedTokensResponse};
use crate::domain::{ChainRoutes, CollectionName, TrackedCollections};
use crate::ports::json_source::{FetchError, JsonFetcher, JsonRequest, fetch_typed};
use crate::ports::observer::Lookup;

/// Header carrying the catalog API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Per-contract smart-query ownership lookup.
pub struct ContractOwnershipResolver<F: JsonFetcher> {
  fetcher: Arc<F>,
  routes: ChainRoutes,
  collections: Arc<TrackedCollections>,
}

impl<F: JsonFetcher> ContractOwnershipResolver<F> {
  pub fn new(fetcher: Arc<F>, routes: ChainRoutes, collections: Arc<TrackedCollections>) -> Self {
    Self {
      fetcher,
      routes,
      collections,
    }
  }

  /// Collections `address` holds tokens of, skipping `already_matched`.
  ///
  /// A contract answering with an error status (a rejected smart query)
  /// counts as no ownership of that collection. Transport and decode
  /// failures fail the whole lookup.
  #[instrument(skip(self, already_matched))]
  pub async fn resolve(
    &self,
    address: &str,
    already_matched: &[CollectionName],
  ) -> Result<Vec<CollectionName>, FetchError> {
    let query = tokens_query(address);
    let mut owned = Vec::new();

    for collection in self.collections.iter() {
      if already_matched.contains(&collection.name) {
        continue;
      }

      let request = JsonRequest::get(self.routes.smart_query(&collection.contract_address, &query));
      let response: OwnedTokensResponse = match fetch_typed(self.fetcher.as_ref(), &request).await {
        Ok(response) => response,
        Err(FetchError::Status { status, .. }) => {
          warn!(collection = %collection.name, status, "Contract query rejected, no ownership");
          continue;
        }
        Err(e) => return Err(e),
      };

      if response.holds_tokens() {
        debug!(collection = %collection.name, "Holds tokens");
        owned.push(collection.name.clone());
      }
    }

    Ok(owned)
  }
}

/// Catalog API ownership lookup.
pub struct CatalogOwnershipResolver<F: JsonFetcher> {
  fetcher: Arc<F>,
  routes: ChainRoutes,
  collections: Arc<TrackedCollections>,
  api_key: String,
}

impl<F: JsonFetcher> CatalogOwnershipResolver<F> {
  pub fn new(
    fetcher: Arc<F>,
    routes: ChainRoutes,
    collections: Arc<TrackedCollections>,
    api_key: impl Into<String>,
  ) -> Self {
    Self {
      fetcher,
      routes,
      collections,
      api_key: api_key.into(),
    }
  }

  /// Tracked collections whose catalog family appears among the
  /// address's tokens, minus `already_matched`.
  #[instrument(skip(self, already_matched))]
  pub async fn resolve(
    &self,
    address: &str,
    already_matched: &[CollectionName],
  ) -> Result<Vec<CollectionName>, FetchError> {
    let Some(url) = self.routes.catalog_tokens(address) else {
      return Err(FetchError::Transport {
        url: String::new(),
        message: "no catalog endpoint configured".into(),
      });
    };

    let request = JsonRequest::get(url).with_header(API_KEY_HEADER, &self.api_key);
    let response: CatalogTokensResponse = fetch_typed(self.fetcher.as_ref(), &request).await?;

    Ok(response
      .matched_collections(&self.collections)
      .into_iter()
      .filter(|name| !already_matched.contains(name))
      .collect())
  }
}

/// The configured ownership source.
pub enum OwnershipResolver<F: JsonFetcher> {
  Contracts(ContractOwnershipResolver<F>),
  Catalog(CatalogOwnershipResolver<F>),
}

impl<F: JsonFetcher> OwnershipResolver<F> {
  /// Which lookup a failure of this resolver is reported as.
  pub fn lookup(&self) -> Lookup {
    match self {
      Self::Contracts(_) => Lookup::Ownership,
      Self::Catalog(_) => Lookup::Catalog,
    }
  }

  pub async fn resolve(
    &self,
    address: &str,
    already_matched: &[CollectionName],
  ) -> Result<Vec<CollectionName>, FetchError> {
    match self {
      Self::Contracts(resolver) => resolver.resolve(address, already_matched).await,
      Self::Catalog(resolver) => resolver.resolve(address, already_matched).await,
    }
  }
}
