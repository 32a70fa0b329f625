//! Integration Tests - End-to-end Scanner Component Testing
//!
//! Tests the interaction between usecases, ports, and mock adapters.
//! Uses mockall for trait mocking and tokio::test for async tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockall::mock;
use serde_json::{Value, json};

use injective_eligibility_scanner::adapters::persistence::ReportStore;
use injective_eligibility_scanner::domain::{
    ChainRoutes, Collection, ParticipationRules, Registrant, ReportFormat, TrackedCollections,
};
use injective_eligibility_scanner::ports::json_source::{FetchError, JsonFetcher, JsonRequest};
use injective_eligibility_scanner::ports::observer::{Lookup, ScanObserver};
use injective_eligibility_scanner::ports::report_sink::ReportSink;
use injective_eligibility_scanner::ports::sleeper::Sleeper;
use injective_eligibility_scanner::usecases::{
    EligibilityScanner, OwnershipSource, ScanError, ScanSettings,
};

// ---- Mock Definitions ----

mock! {
    pub Fetcher {}

    #[async_trait::async_trait]
    impl JsonFetcher for Fetcher {
        async fn fetch_json(&self, request: &JsonRequest) -> Result<Value, FetchError>;
    }
}

mock! {
    pub Sleep {}

    #[async_trait::async_trait]
    impl Sleeper for Sleep {
        async fn sleep(&self, duration: Duration);
    }
}

/// Observer collecting soft failures for assertions.
#[derive(Default)]
struct RecordingObserver {
    failures: Mutex<Vec<Lookup>>,
    scanned: Mutex<usize>,
}

impl ScanObserver for RecordingObserver {
    fn address_scanned(&self) {
        *self.scanned.lock().unwrap() += 1;
    }

    fn lookup_failed(&self, lookup: Lookup) {
        self.failures.lock().unwrap().push(lookup);
    }
}

// ---- Fixtures ----

const MARKETPLACE: &str = "inj1l9nh9wv24fktjvclc4zgrgyzees7rwdtx45f54";
const VAULT: &str = "inj1vcqkkvqs7prqu70dpddfj7kqeqfdz5gg662qs3";
const QUANTS_CONTRACT: &str = "inj1quantscontract";
const NINJA_CONTRACT: &str = "inj1ninjacontract";

fn settings(batch_size: usize) -> ScanSettings {
    ScanSettings {
        routes: ChainRoutes::new("https://lcd.test/", "https://explorer.test"),
        collections: TrackedCollections::new(vec![
            Collection::new(QUANTS_CONTRACT, "Quants"),
            Collection::new(NINJA_CONTRACT, "Ninja"),
        ])
        .unwrap(),
        marketplace_contract: MARKETPLACE.to_string(),
        native_denom: "inj".to_string(),
        participation: ParticipationRules::new(VAULT, "injective.exchange.v1beta1."),
        ownership: OwnershipSource::Contracts,
        batch_size,
        batch_pause: Duration::from_secs(1),
    }
}

fn registrant(identifier: &str, address: &str) -> Registrant {
    Registrant {
        identifier: identifier.to_string(),
        address: address.to_string(),
    }
}

fn is_index(req: &JsonRequest) -> bool {
    req.url.contains(MARKETPLACE)
}

fn is_balance(req: &JsonRequest) -> bool {
    req.url.contains("/cosmos/bank/v1beta1/balances/")
}

fn is_history(req: &JsonRequest) -> bool {
    req.url.contains("/api/explorer/v1/accountTxs/")
}

fn idle_sleeper() -> MockSleep {
    let mut sleeper = MockSleep::new();
    sleeper.expect_sleep().returning(|_| ());
    sleeper
}

// ---- Scenarios ----

#[tokio::test]
async fn test_sell_order_match_without_live_query() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .times(1)
        .returning(|_| {
            Ok(json!({"data": {"orders": [
                {"owner": "inj1a", "contract_address": QUANTS_CONTRACT, "price": "100"}
            ]}}))
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains(QUANTS_CONTRACT))
        .never();
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains(NINJA_CONTRACT))
        .times(1)
        .returning(|_| Ok(json!({"data": {"ids": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .times(1)
        .returning(|_| Ok(json!({"balances": []})));
    fetcher.expect_fetch_json().withf(|req| is_history(req)).never();

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5));
    let outcome = scanner.run(&[registrant("a@example.com", "inj1a")]).await.unwrap();

    let records = outcome.report.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, "inj1a");
    assert_eq!(records[0].collections, ["Quants"]);
    assert_eq!(records[0].balance, 0);
    assert!(!records[0].exchange_flag);
}

#[tokio::test]
async fn test_funded_address_checks_participation_once() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| Ok(json!({"data": {"orders": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains("/smart/") && !is_index(req))
        .times(2)
        .returning(|_| Ok(json!({"data": {"ids": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url == "https://lcd.test/cosmos/bank/v1beta1/balances/inj1abc")
        .times(1)
        .returning(|_| {
            Ok(json!({"balances": [
                {"denom": "peggy0xdAC17F958D2ee523a2206206994597C13D831ec7", "amount": "42"},
                {"denom": "inj", "amount": "5000000"}
            ]}))
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url == "https://explorer.test/api/explorer/v1/accountTxs/inj1abc")
        .times(1)
        .returning(|_| {
            Ok(json!({"data": [
                {"messages": [], "logs": [
                    {"events": [{"type": "injective.exchange.v1beta1.EventFoo"}]}
                ]}
            ]}))
        });

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5));
    let outcome = scanner
        .run(&[registrant("a@example.com", "inj1abc")])
        .await
        .unwrap();

    let record = &outcome.report.records()[0];
    assert_eq!(record.balance, 5_000_000);
    assert!(record.exchange_flag);
    assert!(!record.vault_flag);
    assert!(record.collections.is_empty());
}

#[tokio::test]
async fn test_vault_message_sets_vault_flag() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| Ok(json!({"data": {"orders": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains("/smart/") && !is_index(req))
        .returning(|_| Ok(json!({"data": {"ids": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .returning(|_| Ok(json!({"balances": [{"denom": "inj", "amount": "1"}]})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_history(req))
        .returning(|_| {
            Ok(json!({"data": [
                {"messages": [{"value": {"contract_address": VAULT}}], "logs": []}
            ]}))
        });

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5));
    let outcome = scanner.run(&[registrant("v@example.com", "inj1v")]).await.unwrap();

    let record = &outcome.report.records()[0];
    assert!(record.vault_flag);
    assert!(!record.exchange_flag);
}

#[tokio::test]
async fn test_address_without_signals_is_excluded() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| {
            Ok(json!({"data": {"orders": [{"owner": "inj1other", "contract_address": QUANTS_CONTRACT}]}}))
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains("/smart/") && !is_index(req))
        .returning(|_| Ok(json!({"data": {"ids": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .returning(|_| Ok(json!({"balances": [{"denom": "inj", "amount": "0"}]})));
    fetcher.expect_fetch_json().withf(|req| is_history(req)).never();

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5));
    let outcome = scanner.run(&[registrant("z@example.com", "inj1zero")]).await.unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.summary.scanned, 1);
    assert_eq!(outcome.summary.retained, 0);
}

#[tokio::test]
async fn test_soft_failures_are_observed_and_scan_continues() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| Ok(json!({"data": {"orders": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains("/smart/") && !is_index(req))
        .returning(|req| {
            Err(FetchError::Transport {
                url: req.url.clone(),
                message: "connection reset".into(),
            })
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .returning(|_| Ok(json!({"balances": [{"denom": "inj", "amount": "7"}]})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_history(req))
        .returning(|req| {
            Err(FetchError::Transport {
                url: req.url.clone(),
                message: "timed out".into(),
            })
        });

    let observer = Arc::new(RecordingObserver::default());
    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5))
        .with_observer(Arc::clone(&observer) as Arc<dyn ScanObserver>);

    let outcome = scanner
        .run(&[registrant("a", "inj1a"), registrant("b", "inj1b")])
        .await
        .unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.summary.soft_failures, 4);
    assert_eq!(*observer.scanned.lock().unwrap(), 2);
    assert_eq!(
        *observer.failures.lock().unwrap(),
        [
            Lookup::Ownership,
            Lookup::Participation,
            Lookup::Ownership,
            Lookup::Participation
        ]
    );
}

#[tokio::test]
async fn test_rejected_contract_query_keeps_other_collections() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| Ok(json!({"data": {"orders": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains(QUANTS_CONTRACT))
        .times(1)
        .returning(|req| {
            Err(FetchError::Status {
                url: req.url.clone(),
                status: 500,
            })
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains(NINJA_CONTRACT))
        .times(1)
        .returning(|_| Ok(json!({"data": {"ids": ["1"]}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .returning(|_| Ok(json!({"balances": []})));

    let observer = Arc::new(RecordingObserver::default());
    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(5))
        .with_observer(Arc::clone(&observer) as Arc<dyn ScanObserver>);

    let outcome = scanner.run(&[registrant("a", "inj1a")]).await.unwrap();

    assert_eq!(outcome.report.records()[0].collections, ["Ninja"]);
    assert_eq!(outcome.summary.soft_failures, 0);
    assert!(observer.failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_index_failure_aborts_before_any_address() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .times(1)
        .returning(|_| Ok(json!({"message": "contract not found"})));
    fetcher.expect_fetch_json().withf(|req| !is_index(req)).never();

    let mut sleeper = MockSleep::new();
    sleeper.expect_sleep().never();

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(sleeper), settings(1));
    let result = scanner
        .run(&[registrant("a", "inj1a"), registrant("b", "inj1b")])
        .await;

    assert!(matches!(
        result,
        Err(ScanError::SellOrders(FetchError::Decode { .. }))
    ));
}

#[tokio::test]
async fn test_pauses_between_batches_only() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| Ok(json!({"data": {"orders": []}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| !is_index(req))
        .returning(|_| Ok(json!({})));

    let mut sleeper = MockSleep::new();
    sleeper
        .expect_sleep()
        .withf(|d| *d == Duration::from_secs(1))
        .times(2)
        .returning(|_| ());

    let rows: Vec<Registrant> = (0..11)
        .map(|i| registrant(&format!("user{i}@example.com"), &format!("inj1user{i}")))
        .collect();

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(sleeper), settings(5));
    let outcome = scanner.run(&rows).await.unwrap();

    assert_eq!(outcome.summary.scanned, 11);
    assert_eq!(outcome.summary.pauses, 2);
}

#[tokio::test]
async fn test_report_round_trips_through_store() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|req| is_index(req))
        .returning(|_| {
            Ok(json!({"data": {"orders": [
                {"owner": "inj1a", "contract_address": NINJA_CONTRACT},
                {"owner": "inj1b", "contract_address": QUANTS_CONTRACT}
            ]}}))
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| req.url.contains("/smart/") && !is_index(req))
        .returning(|_| Ok(json!({"data": {"ids": ["3"]}})));
    fetcher
        .expect_fetch_json()
        .withf(|req| is_balance(req))
        .returning(|_| {
            Ok(json!({"balances": [{"denom": "inj", "amount": "2500000000000000000000000"}]}))
        });
    fetcher
        .expect_fetch_json()
        .withf(|req| is_history(req))
        .returning(|_| Ok(json!({"data": []})));

    let scanner = EligibilityScanner::new(Arc::new(fetcher), Arc::new(idle_sleeper()), settings(0));
    let outcome = scanner
        .run(&[registrant("a", "inj1a"), registrant("b", "inj1b")])
        .await
        .unwrap();

    let records = outcome.report.records();
    assert_eq!(records[0].collections, ["Ninja", "Quants"]);
    assert_eq!(records[1].collections, ["Quants", "Ninja"]);

    let dir = std::env::temp_dir().join(format!("eligibility-scan-it-{}", std::process::id()));
    let store = ReportStore::new(dir.join("results.json"), ReportFormat::Full);
    store.save(&outcome.report).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, records);
    assert_eq!(loaded[0].balance, 2_500_000_000_000_000_000_000_000);

    let _ = std::fs::remove_dir_all(dir);
}
