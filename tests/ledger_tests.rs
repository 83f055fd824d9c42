//! Ledger facade and configuration tests.
//!
//! These tests verify:
//! 1. Endpoint failover order and NoServerAvailable exhaustion
//! 2. Operation contracts (auto-connect, response shapes)
//! 3. Builder payloads survive the full build → submit path
//! 4. Protocol config resolution from the environment

use once_cell::sync::Lazy;
use std::sync::Mutex;

use xrplend::config::{Network, ProtocolConfig};
use xrplend::ledger::{LedgerError, LedgerService, MockProfile};
use xrplend::tx;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

fn deterministic(network: Network) -> LedgerService {
    LedgerService::with_profile(network, MockProfile::deterministic())
}

#[tokio::test]
async fn mainnet_failover_exhausts_all_three_endpoints() {
    let profile = MockProfile { connect_failure: 1.0, latency: false, ..MockProfile::deterministic() };
    let ledger = LedgerService::with_profile(Network::Mainnet, profile);

    let err = ledger.connect().await.expect_err("all endpoints down");
    assert_eq!(err.to_string(), "Failed to connect to any XRPL mainnet server");
    assert!(matches!(err, LedgerError::NoServerAvailable("mainnet")));
    assert_eq!(ledger.current_server().await, None);
}

#[tokio::test]
async fn reconnect_after_disconnect() {
    let ledger = deterministic(Network::Mainnet);
    ledger.connect().await.expect("connect");
    assert_eq!(ledger.current_server().await, Some("wss://xrplcluster.com"));

    ledger.disconnect().await;
    assert!(!ledger.is_connected().await);

    // Data call reconnects on its own
    ledger.account_info("rACCT").await.expect("info");
    assert!(ledger.is_connected().await);
}

#[tokio::test]
async fn account_info_contract_fields() {
    let ledger = deterministic(Network::Testnet);
    let info = ledger.account_info("rLENDER").await.expect("info");

    assert_eq!(info.account_data.account, "rLENDER");
    assert_eq!(info.account_data.ledger_entry_type, "AccountRoot");
    assert_eq!(info.account_data.previous_txn_id.len(), 64);
    assert!(info.account_data.sequence >= 1);
    assert!(info.validated);

    // Wire shape keeps the ledger's PascalCase field names
    let v = serde_json::to_value(&info).expect("json");
    assert!(v["account_data"]["Balance"].is_string());
    assert!(v["account_data"]["OwnerCount"].is_number());
}

#[tokio::test]
async fn trust_line_enumeration_shape() {
    let ledger = deterministic(Network::Testnet);
    let lines = ledger.account_lines("rHOLDER").await.expect("lines");

    assert_eq!(lines.account, "rHOLDER");
    assert!(lines.validated);
    let line = &lines.lines[0];
    assert_eq!(line.currency, "RLUSD");
    assert_eq!(line.limit, "1000000");
    assert!(line.balance.parse::<f64>().is_ok());
}

#[tokio::test]
async fn built_payloads_submit_cleanly() {
    let ledger = deterministic(Network::Devnet);

    let escrow = tx::escrow_create("rBORROWER", "rPOOL", &tx::xrp_to_drops(50.0), 1_700_000_000, 1_702_600_000);
    let result = ledger.submit(&escrow).await.expect("submit");
    assert_eq!(result.hash.len(), 64);
    assert_eq!(result.meta["TransactionResult"], "tesSUCCESS");

    let lookup = ledger.transaction(&result.hash).await.expect("lookup");
    assert_eq!(lookup.expect("found").hash, result.hash);
}

#[tokio::test]
async fn submission_failures_surface_as_errors() {
    let profile = MockProfile { submit_failure: 1.0, latency: false, ..MockProfile::deterministic() };
    let ledger = LedgerService::with_profile(Network::Testnet, profile);

    let payload = tx::repay("rA", "rPOOL", tx::IssuedAmount::new("RLUSD", "rI", "10"));
    let err = ledger.submit(&payload).await.expect_err("must fail");
    assert!(matches!(err, LedgerError::Submission(_)));
    assert!(err.to_string().contains("Insufficient balance"));
}

#[test]
fn protocol_config_reads_environment() {
    let _guard = lock_env();
    std::env::set_var("XRPLEND_ISSUER", "rENVISSUER");
    std::env::set_var("XRPLEND_POOL", "rENVPOOL");
    std::env::set_var("XRPLEND_NETWORK", "devnet");

    let config = ProtocolConfig::from_env();
    assert_eq!(config.issuer, "rENVISSUER");
    assert_eq!(config.pool_address, "rENVPOOL");
    assert_eq!(config.currency, "RLUSD");
    assert_eq!(config.network, Network::Devnet);

    std::env::remove_var("XRPLEND_ISSUER");
    std::env::remove_var("XRPLEND_POOL");
    std::env::remove_var("XRPLEND_NETWORK");
}

#[test]
fn protocol_config_builder_defaults() {
    let _guard = lock_env();
    std::env::remove_var("XRPLEND_ISSUER");
    std::env::remove_var("XRPLEND_NETWORK");

    let config = ProtocolConfig::new("rISSUER", "rPOOL")
        .with_currency("USD")
        .with_network(Network::Mainnet);
    assert_eq!(config.currency, "USD");
    assert_eq!(config.network, Network::Mainnet);

    let from_env = ProtocolConfig::from_env();
    assert_eq!(from_env.network, Network::Testnet); // default
    assert!(from_env.issuer.is_empty());
}
