//! Xaman (XUMM) adapter - QR/deep-link flow, no injected global.

use async_trait::async_trait;

use crate::tx::TransactionPayload;
use crate::wallet::{AdapterId, Connected, Submitted, WalletAdapter, WalletError};

const NAME: &str = "Xaman (XUMM)";

/// Deep-link wallet. Always reports available (the flow has no local
/// precondition), but the sign-in round trip is not wired up: `connect`
/// yields an empty address and signing fails with
/// [`WalletError::NotImplemented`].
#[derive(Default)]
pub struct XamanAdapter;

impl XamanAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WalletAdapter for XamanAdapter {
    fn id(&self) -> AdapterId {
        AdapterId::Xaman
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn connect(&self) -> Result<Connected, WalletError> {
        // Address resolution happens after the deep-link sign-in completes,
        // which this core does not drive. TODO: model an awaiting-approval
        // state once the deep-link round trip exists.
        Ok(Connected { address: String::new(), network: None })
    }

    async fn sign_and_submit(&self, _tx: &TransactionPayload) -> Result<Submitted, WalletError> {
        Err(WalletError::NotImplemented(NAME))
    }
}
