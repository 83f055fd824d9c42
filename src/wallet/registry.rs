//! Adapter registry - static ordered list of the supported wallets.

use std::sync::Arc;

use crate::provider::Provider;
use crate::wallet::{AdapterId, CrossmarkAdapter, GemAdapter, WalletAdapter, XamanAdapter};

/// Read-only ordered list of wallet adapters, constructed once. The UI
/// iterates it to render wallet choices, checking `is_available` per entry.
pub struct WalletRegistry {
    adapters: Vec<Arc<dyn WalletAdapter>>,
}

impl WalletRegistry {
    pub fn new(adapters: Vec<Arc<dyn WalletAdapter>>) -> Self {
        Self { adapters }
    }

    /// The canonical list in canonical order, wired to whatever provider
    /// globals the host detected.
    pub fn standard(
        crossmark: Option<Arc<dyn Provider>>,
        gem: Option<Arc<dyn Provider>>,
    ) -> Self {
        Self::new(vec![
            Arc::new(CrossmarkAdapter::new(crossmark)),
            Arc::new(GemAdapter::new(gem)),
            Arc::new(XamanAdapter::new()),
        ])
    }

    /// The canonical list with no extension globals present (headless
    /// hosts; only the deep-link adapter reports available).
    pub fn detect() -> Self {
        Self::standard(None, None)
    }

    pub fn find(&self, id: AdapterId) -> Option<Arc<dyn WalletAdapter>> {
        self.adapters.iter().find(|a| a.id() == id).cloned()
    }

    pub fn adapters(&self) -> &[Arc<dyn WalletAdapter>] {
        &self.adapters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_and_lookup() {
        let registry = WalletRegistry::detect();
        let ids: Vec<_> = registry.adapters().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![AdapterId::Crossmark, AdapterId::Gem, AdapterId::Xaman]);

        assert!(registry.find(AdapterId::Gem).is_some());
        assert_eq!(registry.find(AdapterId::Gem).unwrap().name(), "Gem Wallet");
    }

    #[test]
    fn only_deep_link_available_without_providers() {
        let registry = WalletRegistry::detect();
        let available: Vec<_> = registry
            .adapters()
            .iter()
            .filter(|a| a.is_available())
            .map(|a| a.id())
            .collect();
        assert_eq!(available, vec![AdapterId::Xaman]);
    }
}
