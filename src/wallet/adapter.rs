//! WalletAdapter trait and the wallet error taxonomy.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::tx::TransactionPayload;

/// Closed set of supported wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterId {
    Crossmark,
    Gem,
    Xaman,
}

impl AdapterId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterId::Crossmark => "crossmark",
            AdapterId::Gem => "gem",
            AdapterId::Xaman => "xaman",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "crossmark" => Some(AdapterId::Crossmark),
            "gem" => Some(AdapterId::Gem),
            "xaman" | "xumm" => Some(AdapterId::Xaman),
            _ => None,
        }
    }
}

/// Wallet and session errors.
#[derive(Error, Debug)]
pub enum WalletError {
    /// Provider global absent at call time.
    #[error("{0} not installed")]
    AdapterUnavailable(&'static str),

    /// Unknown adapter id requested.
    #[error("Wallet not supported: {0}")]
    UnsupportedWallet(String),

    /// Adapter known but its provider is not present.
    #[error("{0} not available")]
    WalletUnavailable(&'static str),

    /// Provider responded but no address could be extracted.
    #[error("Unable to get address from {0}")]
    AddressUnavailable(&'static str),

    /// Provider responded but no transaction hash could be extracted.
    #[error("{0} did not return a tx hash")]
    NoTransactionHash(&'static str),

    /// Signing attempted with no active session.
    #[error("No wallet connected")]
    NoWalletConnected,

    /// Known gap, surfaced to the caller rather than hidden.
    #[error("{0} flow not implemented")]
    NotImplemented(&'static str),

    /// Provider call itself failed (transport, user rejection, ...).
    #[error("Provider call failed: {0}")]
    Provider(#[from] anyhow::Error),
}

/// Successful connect result.
#[derive(Debug, Clone, Serialize)]
pub struct Connected {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Successful sign-and-submit result.
#[derive(Debug, Clone, Serialize)]
pub struct Submitted {
    pub hash: String,
}

/// One wallet behind one interface. Implementations are constructed once at
/// process start and shared read-only by the registry and the session.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn id(&self) -> AdapterId;

    /// Display name, also used in error messages.
    fn name(&self) -> &'static str;

    /// Synchronous capability probe. For extension wallets this is the
    /// presence of the injected global.
    fn is_available(&self) -> bool;

    /// Prompt the provider and resolve the active address (and network,
    /// when the provider reports one).
    async fn connect(&self) -> Result<Connected, WalletError>;

    /// Convenience wrapper over [`connect`](Self::connect). May re-trigger
    /// the provider's prompt; prefer the session's cached address when one
    /// exists.
    async fn get_address(&self) -> Result<String, WalletError> {
        Ok(self.connect().await?.address)
    }

    /// Hand the payload to the provider for signing and submission.
    /// Ownership of the payload's contents transfers to the provider.
    async fn sign_and_submit(&self, tx: &TransactionPayload) -> Result<Submitted, WalletError>;

    /// Sign without submitting. Optional capability.
    async fn sign_only(&self, tx: &TransactionPayload) -> Result<String, WalletError> {
        let _ = tx;
        Err(WalletError::NotImplemented(self.name()))
    }

    /// Active network, when the provider exposes it. Optional capability.
    async fn get_network(&self) -> Result<Option<String>, WalletError> {
        Ok(None)
    }

    /// Tear down provider state. Optional capability; default is a no-op.
    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_id_round_trip() {
        for id in [AdapterId::Crossmark, AdapterId::Gem, AdapterId::Xaman] {
            assert_eq!(AdapterId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(AdapterId::from_str("XUMM"), Some(AdapterId::Xaman));
        assert_eq!(AdapterId::from_str("ledger"), None);
    }

    #[test]
    fn error_messages_name_the_wallet() {
        assert_eq!(
            WalletError::AdapterUnavailable("Crossmark").to_string(),
            "Crossmark not installed"
        );
        assert_eq!(
            WalletError::NoTransactionHash("Gem Wallet").to_string(),
            "Gem Wallet did not return a tx hash"
        );
        assert_eq!(WalletError::NoWalletConnected.to_string(), "No wallet connected");
    }
}
