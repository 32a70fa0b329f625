//! Remote endpoint layout: chain REST (LCD), explorer indexer, NFT catalog.

use base64::Engine;
use serde_json::{Value, json};

/// Smart query listing every open marketplace sell order.
pub fn all_sell_orders_query() -> Value {
    json!({ "all_sell_orders": {} })
}

/// URL builder for every remote call the scanner makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRoutes {
    rpc_base: String,
    indexer_base: String,
    catalog_base: Option<String>,
}

impl ChainRoutes {
    pub fn new(rpc_base: &str, indexer_base: &str) -> Self {
        Self {
            rpc_base: normalize(rpc_base),
            indexer_base: normalize(indexer_base),
            catalog_base: None,
        }
    }

    pub fn with_catalog(mut self, catalog_base: &str) -> Self {
        self.catalog_base = Some(normalize(catalog_base));
        self
    }

    /// `GET {rpc}/cosmwasm/wasm/v1/contract/{contract}/smart/{base64(query)}`
    pub fn smart_query(&self, contract: &str, query: &Value) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(query.to_string());
        format!(
            "{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
            self.rpc_base, contract, payload
        )
    }

    /// `GET {rpc}/cosmos/bank/v1beta1/balances/{address}`
    pub fn balances(&self, address: &str) -> String {
        format!("{}/cosmos/bank/v1beta1/balances/{}", self.rpc_base, address)
    }

    /// `GET {indexer}/api/explorer/v1/accountTxs/{address}`
    pub fn account_txs(&self, address: &str) -> String {
        format!("{}/api/explorer/v1/accountTxs/{}", self.indexer_base, address)
    }

    /// `GET {catalog}/tokens/{address}?offset=0&limit=100`, when a catalog is configured.
    pub fn catalog_tokens(&self, address: &str) -> Option<String> {
        self.catalog_base
            .as_ref()
            .map(|base| format!("{}/tokens/{}?offset=0&limit=100", base, address))
    }
}

fn normalize(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_orders_url_matches_known_payload() {
        let routes = ChainRoutes::new("https://lcd.example.com/", "https://indexer.example.com");
        assert_eq!(
            routes.smart_query(
                "inj1l9nh9wv24fktjvclc4zgrgyzees7rwdtx45f54",
                &all_sell_orders_query()
            ),
            "https://lcd.example.com/cosmwasm/wasm/v1/contract/\
             inj1l9nh9wv24fktjvclc4zgrgyzees7rwdtx45f54/smart/eyJhbGxfc2VsbF9vcmRlcnMiOnt9fQ=="
        );
    }

    #[test]
    fn test_account_and_balance_urls() {
        let routes = ChainRoutes::new("https://lcd", "https://idx//");
        assert_eq!(routes.balances("inj1a"), "https://lcd/cosmos/bank/v1beta1/balances/inj1a");
        assert_eq!(routes.account_txs("inj1a"), "https://idx/api/explorer/v1/accountTxs/inj1a");
        assert_eq!(routes.catalog_tokens("inj1a"), None);

        let routes = routes.with_catalog("https://catalog/v1/");
        assert_eq!(
            routes.catalog_tokens("inj1a").as_deref(),
            Some("https://catalog/v1/tokens/inj1a?offset=0&limit=100")
        );
    }
}
