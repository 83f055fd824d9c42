//! Network and protocol configuration.
//!
//! Per-network endpoint candidates (tried in order by the ledger facade),
//! explorer base URLs and faucets. Protocol parameters (issuer, currency
//! code, pool address) come from the environment.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "livenet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            "devnet" => Some(Network::Devnet),
            _ => None,
        }
    }

    pub fn config(&self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
            Network::Devnet => &DEVNET,
        }
    }
}

/// Static per-network endpoints. Read-only.
#[derive(Debug)]
pub struct NetworkConfig {
    pub name: &'static str,
    /// WebSocket endpoint candidates, tried in order.
    pub servers: &'static [&'static str],
    pub explorer: &'static str,
    pub faucet: Option<&'static str>,
}

static MAINNET: NetworkConfig = NetworkConfig {
    name: "Mainnet",
    servers: &[
        "wss://xrplcluster.com",
        "wss://s1.ripple.com",
        "wss://s2.ripple.com",
    ],
    explorer: "https://livenet.xrpl.org",
    faucet: None,
};

static TESTNET: NetworkConfig = NetworkConfig {
    name: "Testnet",
    servers: &[
        "wss://s.altnet.rippletest.net:51233",
        "wss://testnet.xrpl-labs.com",
    ],
    explorer: "https://testnet.xrpl.org",
    faucet: Some("https://faucet.altnet.rippletest.net/accounts"),
};

static DEVNET: NetworkConfig = NetworkConfig {
    name: "Devnet",
    servers: &["wss://s.devnet.rippletest.net:51233"],
    explorer: "https://devnet.xrpl.org",
    faucet: Some("https://faucet.devnet.rippletest.net/accounts"),
};

/// Explorer link for a transaction hash.
pub fn explorer_url(network: Network, hash: &str) -> String {
    format!("{}/transactions/{}", network.config().explorer, hash)
}

/// Protocol parameters. Higher layers construct this (or read the env).
#[derive(Debug, Clone)]
pub struct ProtocolConfig {
    /// Stablecoin issuer account.
    pub issuer: String,
    /// Currency code of the issued asset.
    pub currency: String,
    /// Custody/pool account deposits and repayments target.
    pub pool_address: String,
    pub network: Network,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            currency: "RLUSD".into(),
            pool_address: String::new(),
            network: Network::default(),
        }
    }
}

impl ProtocolConfig {
    pub fn new(issuer: impl Into<String>, pool: impl Into<String>) -> Self {
        Self { issuer: issuer.into(), pool_address: pool.into(), ..Default::default() }
    }
    pub fn with_currency(mut self, code: impl Into<String>) -> Self { self.currency = code.into(); self }
    pub fn with_network(mut self, network: Network) -> Self { self.network = network; self }

    /// Read from `XRPLEND_ISSUER`, `XRPLEND_POOL`, `XRPLEND_CURRENCY`,
    /// `XRPLEND_NETWORK`. Missing variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(issuer) = std::env::var("XRPLEND_ISSUER") {
            config.issuer = issuer;
        }
        if let Ok(pool) = std::env::var("XRPLEND_POOL") {
            config.pool_address = pool;
        }
        if let Ok(code) = std::env::var("XRPLEND_CURRENCY") {
            config.currency = code;
        }
        if let Some(network) = std::env::var("XRPLEND_NETWORK").ok().and_then(|v| Network::from_str(&v)) {
            config.network = network;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_round_trip() {
        for net in [Network::Mainnet, Network::Testnet, Network::Devnet] {
            assert_eq!(Network::from_str(net.as_str()), Some(net));
        }
        assert_eq!(Network::from_str("MAINNET"), Some(Network::Mainnet));
        assert_eq!(Network::from_str("ropsten"), None);
    }

    #[test]
    fn server_lists_ordered() {
        assert_eq!(Network::Mainnet.config().servers.len(), 3);
        assert_eq!(Network::Testnet.config().servers[0], "wss://s.altnet.rippletest.net:51233");
        assert_eq!(Network::Devnet.config().servers.len(), 1);
        assert!(Network::Mainnet.config().faucet.is_none());
        assert!(Network::Testnet.config().faucet.is_some());
    }

    #[test]
    fn explorer_links() {
        let url = explorer_url(Network::Testnet, "ABC123");
        assert_eq!(url, "https://testnet.xrpl.org/transactions/ABC123");
    }
}
