//! Wallet session - the single source of truth for who is connected, via
//! which adapter, on which network, and the choke point for signing.
//!
//! The chosen adapter id is mirrored to durable storage so a later process
//! start can attempt silent reconnection. The silent attempt swallows
//! failures: it logs, clears the saved id, and leaves the session
//! disconnected.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::KeyStorage;
use crate::tx::TransactionPayload;
use crate::wallet::{AdapterId, Connected, Submitted, WalletAdapter, WalletError, WalletRegistry};

/// Storage key holding the last-connected adapter id.
pub const ADAPTER_KEY: &str = "wallet.adapter";

/// Session lifecycle. There is no heartbeat: a Connected session only
/// discovers staleness when a later signing call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Point-in-time view of the session, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Outcome of the startup reconnect attempt. Failure is swallowed (logged,
/// saved id cleared); the outcome value exists so callers and tests can
/// still observe what happened.
#[derive(Debug, Clone)]
pub enum RestoreOutcome {
    Restored(Connected),
    /// No adapter id saved from a previous session.
    NoSaved,
    /// Saved id unknown, or its provider is not present; the saved id is
    /// left in place for a future start where the extension is back.
    Unavailable,
    /// The adapter's connect failed; the saved id was cleared.
    Failed,
}

struct Inner {
    adapter: Option<Arc<dyn WalletAdapter>>,
    address: Option<String>,
    network: Option<String>,
    state: SessionState,
}

/// Process-wide wallet session. Shared by handle; all mutation goes through
/// `connect` / `disconnect` / `restore`.
///
/// Overlapping calls are last-write-wins: the lock is never held across a
/// provider await, so a second `connect` racing the first simply overwrites
/// its result.
pub struct WalletSession {
    registry: Arc<WalletRegistry>,
    storage: Arc<dyn KeyStorage>,
    inner: RwLock<Inner>,
}

impl WalletSession {
    pub fn new(registry: Arc<WalletRegistry>, storage: Arc<dyn KeyStorage>) -> Self {
        Self {
            registry,
            storage,
            inner: RwLock::new(Inner {
                adapter: None,
                address: None,
                network: None,
                state: SessionState::Disconnected,
            }),
        }
    }

    /// Connect via the adapter registered under `id` and persist the choice.
    pub async fn connect(&self, id: AdapterId) -> Result<Connected, WalletError> {
        let adapter = self
            .registry
            .find(id)
            .ok_or_else(|| WalletError::UnsupportedWallet(id.as_str().into()))?;
        if !adapter.is_available() {
            return Err(WalletError::WalletUnavailable(adapter.name()));
        }

        self.inner.write().await.state = SessionState::Connecting;
        let result = adapter.connect().await;

        let mut inner = self.inner.write().await;
        match result {
            Ok(connected) => {
                inner.address = match connected.address.as_str() {
                    "" => None,
                    a => Some(a.to_string()),
                };
                inner.network = connected.network.clone();
                inner.adapter = Some(adapter);
                inner.state = if inner.address.is_some() {
                    SessionState::Connected
                } else {
                    // Deep-link connect without a resolved address: adapter
                    // held, but the session does not claim a connection.
                    SessionState::Disconnected
                };
                self.storage.set(ADAPTER_KEY, id.as_str());
                tracing::info!(adapter = id.as_str(), "wallet connected");
                Ok(connected)
            }
            Err(e) => {
                inner.state = if inner.address.is_some() {
                    SessionState::Connected
                } else {
                    SessionState::Disconnected
                };
                Err(e)
            }
        }
    }

    /// Delegate to the active adapter. The session performs no retry and no
    /// payload validation.
    pub async fn sign_and_submit(&self, tx: &TransactionPayload) -> Result<Submitted, WalletError> {
        let adapter = {
            let inner = self.inner.read().await;
            inner.adapter.clone().ok_or(WalletError::NoWalletConnected)?
        };
        adapter.sign_and_submit(tx).await
    }

    /// Clear the session and the persisted adapter id. Idempotent.
    pub async fn disconnect(&self) {
        let mut inner = self.inner.write().await;
        inner.adapter = None;
        inner.address = None;
        inner.network = None;
        inner.state = SessionState::Disconnected;
        self.storage.remove(ADAPTER_KEY);
    }

    /// Best-effort silent reconnect from the persisted adapter id. Called
    /// once at process start.
    pub async fn restore(&self) -> RestoreOutcome {
        let Some(saved) = self.storage.get(ADAPTER_KEY) else {
            return RestoreOutcome::NoSaved;
        };
        let Some(id) = AdapterId::from_str(&saved) else {
            tracing::warn!(adapter = %saved, "saved wallet adapter unknown, ignoring");
            return RestoreOutcome::Unavailable;
        };
        let available = self
            .registry
            .find(id)
            .map(|a| a.is_available())
            .unwrap_or(false);
        if !available {
            return RestoreOutcome::Unavailable;
        }

        match self.connect(id).await {
            Ok(connected) => {
                tracing::info!(adapter = id.as_str(), "wallet session restored");
                RestoreOutcome::Restored(connected)
            }
            Err(e) => {
                tracing::warn!(
                    adapter = id.as_str(),
                    error = %e,
                    "silent reconnect failed, clearing saved adapter"
                );
                self.storage.remove(ADAPTER_KEY);
                RestoreOutcome::Failed
            }
        }
    }

    // Accessors

    /// Derived: true iff an address is held.
    pub async fn connected(&self) -> bool {
        self.inner.read().await.address.is_some()
    }

    pub async fn address(&self) -> Option<String> {
        self.inner.read().await.address.clone()
    }

    pub async fn network(&self) -> Option<String> {
        self.inner.read().await.network.clone()
    }

    pub async fn adapter_id(&self) -> Option<AdapterId> {
        self.inner.read().await.adapter.as_ref().map(|a| a.id())
    }

    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            connected: inner.address.is_some(),
            adapter: inner.adapter.as_ref().map(|a| a.id().as_str()),
            address: inner.address.clone(),
            network: inner.network.clone(),
        }
    }
}
