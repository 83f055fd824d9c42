//! Crossmark adapter - browser-extension provider.

use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{self, Provider};
use crate::tx::TransactionPayload;
use crate::wallet::{AdapterId, Connected, Submitted, WalletAdapter, WalletError};

const NAME: &str = "Crossmark";

/// Binds to the injected `crossmark` global. `None` means the extension is
/// not installed.
pub struct CrossmarkAdapter {
    provider: Option<Arc<dyn Provider>>,
}

impl CrossmarkAdapter {
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> Result<&Arc<dyn Provider>, WalletError> {
        self.provider.as_ref().ok_or(WalletError::AdapterUnavailable(NAME))
    }
}

#[async_trait]
impl WalletAdapter for CrossmarkAdapter {
    fn id(&self) -> AdapterId {
        AdapterId::Crossmark
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn connect(&self) -> Result<Connected, WalletError> {
        let provider = self.provider()?;
        let response = provider.connect().await?;

        // The connect response usually carries the account; older builds
        // only answer on the dedicated address call.
        let address = match provider::address_from_response(&response) {
            Some(address) => address,
            None => {
                let fallback = provider.get_address().await?;
                provider::address_from_response(&fallback)
                    .ok_or(WalletError::AddressUnavailable(NAME))?
            }
        };

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
