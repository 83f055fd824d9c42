//! Xrplend: XRPL lending wallet core. Adapters sign, builders shape, the
//! session is the source of truth.
//!
//! # Architecture
//!
//! ```text
//! WalletSession (who is connected, via which adapter, on which network)
//!   │
//!   ├── WalletRegistry ── CrossmarkAdapter ─┐
//!   │                  ── GemAdapter ───────┼── Provider (injected global)
//!   │                  ── XamanAdapter      │
//!   │                                       ▼
//!   ├── tx builders ──→ TransactionPayload ──→ sign-and-submit ──→ {hash}
//!   │
//!   ├── KeyStorage ("wallet.adapter", silent reconnect at startup)
//!   │
//!   └── LedgerService (endpoint failover, account info / trust lines /
//!                      submission; mock-backed)
//! ```
//!
//! # Session operations
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | `connect(id)` | registry lookup → adapter connect → persist id |
//! | `sign_and_submit(tx)` | delegate to the active adapter, unchanged |
//! | `disconnect()` | clear state + persisted id, idempotent |
//! | `restore()` | best-effort silent reconnect from the persisted id |
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use xrplend::{tx, AdapterId, MemoryStorage, WalletRegistry, WalletSession};
//!
//! let registry = Arc::new(WalletRegistry::standard(Some(crossmark), None));
//! let session = WalletSession::new(registry, Arc::new(MemoryStorage::new()));
//!
//! session.connect(AdapterId::Crossmark).await?;
//! let payload = tx::trust_set(&session.address().await.unwrap(),
//!     "RLUSD", issuer, tx::DEFAULT_TRUST_LIMIT);
//! let submitted = session.sign_and_submit(&payload).await?;
//! println!("{}", submitted.hash);
//! ```

pub mod config;
pub mod ledger;
pub mod logging;
pub mod provider;
pub mod storage;
pub mod tx;
pub mod wallet;

pub use config::{explorer_url, Network, NetworkConfig, ProtocolConfig};
pub use ledger::{AccountInfo, AccountLines, LedgerError, LedgerService, MockProfile, TransactionResult, TrustLine};
pub use provider::Provider;
pub use storage::{FileStorage, KeyStorage, MemoryStorage};
pub use tx::{Amount, IssuedAmount, TransactionPayload};
pub use wallet::{
    AdapterId, Connected, CrossmarkAdapter, GemAdapter, RestoreOutcome, SessionSnapshot,
    SessionState, Submitted, WalletAdapter, WalletError, WalletRegistry, WalletSession,
    XamanAdapter,
};
