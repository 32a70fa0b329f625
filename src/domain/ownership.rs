//! NFT ownership evidence from collection contracts and the catalog API.

use serde_json::{Value, json};

use super::collection::{CollectionName, TrackedCollections};
use super::wire::{CatalogTokensResponse, OwnedTokensResponse};

/// Smart query asking a cw721 contract for the tokens of `owner`.
pub fn tokens_query(owner: &str) -> Value {
    json!({ "tokens": { "owner": owner } })
}

impl OwnedTokensResponse {
    /// A present, non-empty `ids` list is evidence of ownership.
    pub fn holds_tokens(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.ids.is_empty())
    }
}

impl CatalogTokensResponse {
    /// Tracked collections (in tracked order) whose catalog family
    /// appears among the returned tokens.
    pub fn matched_collections(&self, tracked: &TrackedCollections) -> Vec<CollectionName> {
        let families: Vec<&str> = self
            .tokens
            .iter()
            .filter_map(|token| token.family.as_ref())
            .map(|family| family.name.as_str())
            .collect();

        tracked
            .iter()
            .filter(|collection| families.contains(&collection.catalog_family()))
            .map(|collection| collection.name.clone())
            .collect()
    }
}
