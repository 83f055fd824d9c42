//! Ledger service facade - connection lifecycle and account/transaction
//! operations against an XRPL network.
//!
//! The facade owns endpoint failover: `connect` walks the network's server
//! candidates in order until one accepts, failing with
//! [`LedgerError::NoServerAvailable`] when all are exhausted. Data
//! operations auto-connect on first use. No operation is retried here;
//! retry policy belongs to the caller.
//!
//! Operation bodies are mock-backed (randomized data and latency, tuned by
//! [`MockProfile`]). A production build replaces the bodies with real
//! ledger-client calls while preserving the method contracts.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{explorer_url, Network};
use crate::tx::TransactionPayload;

/// Ledger-level errors. Callers decide what is retryable.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Every candidate endpoint refused the connection.
    #[error("Failed to connect to any XRPL {0} server")]
    NoServerAvailable(&'static str),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The network accepted the transaction but reported failure.
    #[error("Transaction failed: {0}")]
    Submission(String),
}

/// `account_info` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_data: AccountData,
    pub ledger_current_index: u64,
    pub validated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(rename = "Account")]
    pub account: String,
    /// Native balance in drops, decimal string.
    #[serde(rename = "Balance")]
    pub balance: String,
    #[serde(rename = "Flags")]
    pub flags: u32,
    #[serde(rename = "LedgerEntryType")]
    pub ledger_entry_type: String,
    #[serde(rename = "OwnerCount")]
    pub owner_count: u32,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: String,
    #[serde(rename = "PreviousTxnLgrSeq")]
    pub previous_txn_lgr_seq: u64,
    #[serde(rename = "Sequence")]
    pub sequence: u32,
    pub index: String,
}

/// One trust line from `account_lines`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustLine {
    pub account: String,
    pub balance: String,
    pub currency: String,
    pub limit: String,
    pub limit_peer: String,
    pub quality_in: u32,
    pub quality_out: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_ripple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze: Option<bool>,
}

/// `account_lines` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLines {
    pub account: String,
    pub lines: Vec<TrustLine>,
    pub ledger_current_index: u64,
    pub validated: bool,
}

/// Submission / lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResult {
    pub hash: String,
    pub ledger_index: u64,
    pub meta: Value,
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

/// Mock behavior knobs. Defaults mirror the placeholder backend this facade
/// stands in for; tests use [`MockProfile::deterministic`] so nothing
/// depends on chance.
#[derive(Debug, Clone)]
pub struct MockProfile {
    /// Per-endpoint connect refusal probability.
    pub connect_failure: f64,
    /// Probability an account lookup reports not-found.
    pub account_missing: f64,
    /// Probability a trust line is absent from the account.
    pub line_missing: f64,
    /// Probability a submission fails on balance.
    pub submit_failure: f64,
    /// Probability a submission fails on sequence.
    pub sequence_failure: f64,
    /// Probability a transaction lookup returns nothing.
    pub tx_missing: f64,
    /// Simulate network latency.
    pub latency: bool,
}

impl Default for MockProfile {
    fn default() -> Self {
        Self {
            connect_failure: 0.1,
            account_missing: 0.05,
            line_missing: 0.3,
            submit_failure: 0.05,
            sequence_failure: 0.03,
            tx_missing: 0.1,
            latency: true,
        }
    }
}

impl MockProfile {
    /// No failures, no latency.
    pub fn deterministic() -> Self {
        Self {
            connect_failure: 0.0,
            account_missing: 0.0,
            line_missing: 0.0,
            submit_failure: 0.0,
            sequence_failure: 0.0,
            tx_missing: 0.0,
            latency: false,
        }
    }
}

struct ConnState {
    connected: bool,
    server: Option<&'static str>,
}

/// Facade over one XRPL network.
pub struct LedgerService {
    network: Network,
    profile: MockProfile,
    state: RwLock<ConnState>,
}

impl LedgerService {
    pub fn new(network: Network) -> Self {
        Self::with_profile(network, MockProfile::default())
    }

    pub fn with_profile(network: Network, profile: MockProfile) -> Self {
        Self {
            network,
            profile,
            state: RwLock::new(ConnState { connected: false, server: None }),
        }
    }

    // Connection management

    /// Try each configured endpoint in order until one accepts.
    pub async fn connect(&self) -> Result<(), LedgerError> {
        for &server in self.network.config().servers {
            self.sleep(500, 1000).await;
            if chance(self.profile.connect_failure) {
                tracing::warn!(server, "connect refused, trying next endpoint");
                continue;
            }
            let mut state = self.state.write().await;
            state.connected = true;
            state.server = Some(server);
            tracing::info!(network = self.network.as_str(), server, "connected");
            return Ok(());
        }
        Err(LedgerError::NoServerAvailable(self.network.as_str()))
    }

    pub async fn disconnect(&self) {
        let mut state = self.state.write().await;
        state.connected = false;
        state.server = None;
        tracing::info!(network = self.network.as_str(), "disconnected");
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.connected
    }

    pub async fn current_server(&self) -> Option<&'static str> {
        self.state.read().await.server
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Explorer link for this network, optionally pointing at a hash.
    pub fn explorer_url(&self, hash: Option<&str>) -> String {
        match hash {
            Some(h) => explorer_url(self.network, h),
            None => self.network.config().explorer.to_string(),
        }
    }

    async fn ensure_connected(&self) -> Result<(), LedgerError> {
        if self.is_connected().await {
            return Ok(());
        }
        self.connect().await
    }

    // Account operations

    pub async fn account_info(&self, address: &str) -> Result<AccountInfo, LedgerError> {
        self.ensure_connected().await?;
        self.sleep(500, 500).await;

        if chance(self.profile.account_missing) {
            return Err(LedgerError::AccountNotFound(address.into()));
        }

        let mut rng = rand::thread_rng();
        Ok(AccountInfo {
            account_data: AccountData {
                account: address.into(),
                balance: rng.gen_range(500_000_000u64..2_500_000_000).to_string(),
                flags: 0,
                ledger_entry_type: "AccountRoot".into(),
                owner_count: rng.gen_range(0..10),
                previous_txn_id: "0".repeat(64),
                previous_txn_lgr_seq: ledger_index(&mut rng),
                sequence: rng.gen_range(1..1000),
                index: "0".repeat(64),
            },
            ledger_current_index: ledger_index(&mut rng),
            validated: true,
        })
    }

    pub async fn account_lines(&self, address: &str) -> Result<AccountLines, LedgerError> {
        self.ensure_connected().await?;
        self.sleep(700, 500).await;

        let mut rng = rand::thread_rng();
        let mut lines = Vec::new();
        if !chance(self.profile.line_missing) {
            lines.push(TrustLine {
                account: "rhub8VRN55s94qWKDv6jmDy1pUykJzF3wq".into(),
                balance: format!("{:.2}", rng.gen_range(100.0..1100.0)),
                currency: "RLUSD".into(),
                limit: "1000000".into(),
                limit_peer: "0".into(),
                quality_in: 0,
                quality_out: 0,
                authorized: Some(true),
                no_ripple: None,
                freeze: None,
            });
        }

        Ok(AccountLines {
            account: address.into(),
            lines,
            ledger_current_index: ledger_index(&mut rng),
            validated: true,
        })
    }

    // Transaction operations

    /// Submit an already-signed transaction. The facade does not sign;
    /// signing happens in the wallet adapter.
    pub async fn submit(&self, tx: &TransactionPayload) -> Result<TransactionResult, LedgerError> {
        self.ensure_connected().await?;
        self.sleep(1500, 1500).await;

        if chance(self.profile.submit_failure) {
            return Err(LedgerError::Submission("Insufficient balance".into()));
        }
        if chance(self.profile.sequence_failure) {
            return Err(LedgerError::Submission("Invalid sequence number".into()));
        }

        let mut rng = rand::thread_rng();
        let hash = mock_hash(&mut rng);
        tracing::info!(
            tx_type = %tx.transaction_type,
            account = %tx.account,
            %hash,
            "transaction submitted"
        );
        Ok(TransactionResult {
            hash,
            ledger_index: ledger_index(&mut rng),
            meta: json!({
                "TransactionResult": "tesSUCCESS",
                "TransactionIndex": rng.gen_range(0..100),
            }),
            validated: true,
            date: Some(chrono::Utc::now().timestamp()),
        })
    }

    /// Look up a transaction by hash. `None` when the ledger has no record.
    pub async fn transaction(&self, hash: &str) -> Result<Option<TransactionResult>, LedgerError> {
        self.ensure_connected().await?;
        self.sleep(400, 400).await;

        if chance(self.profile.tx_missing) {
            return Ok(None);
        }

        let mut rng = rand::thread_rng();
        let age = rng.gen_range(0..86_400);
        Ok(Some(TransactionResult {
            hash: hash.into(),
            ledger_index: ledger_index(&mut rng),
            meta: json!({
                "TransactionResult": "tesSUCCESS",
                "TransactionIndex": rng.gen_range(0..100),
            }),
            validated: true,
            date: Some(chrono::Utc::now().timestamp() - age),
        }))
    }

    async fn sleep(&self, base_ms: u64, spread_ms: u64) {
        if !self.profile.latency {
            return;
        }
        let jitter = rand::thread_rng().gen_range(0..=spread_ms);
        tokio::time::sleep(std::time::Duration::from_millis(base_ms + jitter)).await;
    }
}

fn chance(p: f64) -> bool {
    p > 0.0 && rand::thread_rng().gen_bool(p.clamp(0.0, 1.0))
}

fn ledger_index(rng: &mut impl Rng) -> u64 {
    rng.gen_range(80_000_000..81_000_000)
}

fn mock_hash(rng: &mut impl Rng) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    (0..64).map(|_| HEX[rng.gen_range(0..16)] as char).collect()
}
