//! Gem Wallet adapter - browser-extension provider.

use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{self, Provider};
use crate::tx::TransactionPayload;
use crate::wallet::{AdapterId, Connected, Submitted, WalletAdapter, WalletError};

const NAME: &str = "Gem Wallet";

/// Binds to the injected `gemWallet` global. Unlike Crossmark, the connect
/// call answers with a bare acknowledgement; the address lives on the
/// dedicated address call (sometimes as a plain string).
pub struct GemAdapter {
    provider: Option<Arc<dyn Provider>>,
}

impl GemAdapter {
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> Result<&Arc<dyn Provider>, WalletError> {
        self.provider.as_ref().ok_or(WalletError::AdapterUnavailable(NAME))
    }
}

#[async_trait]
impl WalletAdapter for GemAdapter {
    fn id(&self) -> AdapterId {
        AdapterId::Gem
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn connect(&self) -> Result<Connected, WalletError> {
        let provider = self.provider()?;
        provider.connect().await?;

        let response = provider.get_address().await?;
        let address = provider::address_from_response(&response)
            .ok_or(WalletError::AddressUnavailable(NAME))?;

        let network = provider::network_from_response(&provider.get_network().await?);
        Ok(Connected { address, network })
    }

    async fn sign_and_submit(&self, tx: &TransactionPayload) -> Result<Submitted, WalletError> {
        let provider = self.provider()?;
        let response = provider.sign_and_submit(&tx.to_value()).await?;
        let hash = provider::hash_from_response(&response)
            .ok_or(WalletError::NoTransactionHash(NAME))?;
        Ok(Submitted { hash })
    }

    async fn get_network(&self) -> Result<Option<String>, WalletError> {
        let provider = self.provider()?;
        Ok(provider::network_from_response(&provider.get_network().await?))
    }
}
