//! Provider boundary - injected wallet globals behind one trait.
//!
//! In the browser each wallet injects its own global object
//! (`window.crossmark`, `window.gemWallet`, `window.Xumm`) with its own
//! connect/address/network/sign calls and its own response shapes. A
//! [`Provider`] stands in for one injected global: every method returns raw
//! JSON, and a missing method on the global maps to the default
//! implementation returning `Null`.
//!
//! The response shapes are not uniform across providers. Normalization is
//! concentrated here: [`address_from_response`], [`hash_from_response`] and
//! [`network_from_response`] probe a prioritized list of field names and
//! accept bare strings, so adapters call one helper instead of scattering
//! field fallbacks through every call site.

use async_trait::async_trait;
use serde_json::Value;

/// One injected wallet global. Methods mirror the provider's native calls;
/// a provider lacking a call inherits the default (`Null`, as an absent
/// method would yield).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider's connect/enable prompt. May return account data directly.
    async fn connect(&self) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    /// Fetch the active account. Shape varies: `{address}`, `{account}`,
    /// or a bare string.
    async fn get_address(&self) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    /// Fetch the provider's active network, usually `{network}`.
    async fn get_network(&self) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }

    /// Sign the transaction and submit it to the ledger. The response must
    /// contain the transaction hash somewhere an adapter can find it.
    async fn sign_and_submit(&self, tx: &Value) -> anyhow::Result<Value> {
        let _ = tx;
        Ok(Value::Null)
    }

    /// Sign without submitting. Few providers expose this.
    async fn sign_only(&self, tx: &Value) -> anyhow::Result<Value> {
        let _ = tx;
        Ok(Value::Null)
    }

    /// Tear down the provider session, if the provider has one.
    async fn disconnect(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Extract an account address. Probes `account`, then `address` (string or
/// nested `{address}` object), then accepts a bare string response.
pub fn address_from_response(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return non_empty(s);
    }
    if let Some(s) = value.get("account").and_then(Value::as_str) {
        return non_empty(s);
    }
    match value.get("address") {
        Some(Value::String(s)) => non_empty(s),
        Some(nested) => nested
            .get("address")
            .or_else(|| nested.get("account"))
            .and_then(Value::as_str)
            .and_then(non_empty),
        None => None,
    }
}

/// Extract a transaction hash. Probes `txid`, `hash`, `result.hash`, and
/// accepts a bare string response.
pub fn hash_from_response(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return non_empty(s);
    }
    value
        .get("txid")
        .or_else(|| value.get("hash"))
        .or_else(|| value.get("result").and_then(|r| r.get("hash")))
        .and_then(Value::as_str)
        .and_then(non_empty)
}

/// Extract a network name from `{network}` or a bare string.
pub fn network_from_response(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return non_empty(s);
    }
    value.get("network").and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn address_probes_account_first() {
        let res = json!({"account": "rAAA", "address": "rBBB"});
        assert_eq!(address_from_response(&res), Some("rAAA".into()));
    }

    #[test]
    fn address_falls_back_to_address_field() {
        assert_eq!(address_from_response(&json!({"address": "rBBB"})), Some("rBBB".into()));
    }

    #[test]
    fn address_unwraps_nested_object() {
        let res = json!({"address": {"address": "rCCC"}});
        assert_eq!(address_from_response(&res), Some("rCCC".into()));
    }

    #[test]
    fn address_accepts_bare_string() {
        assert_eq!(address_from_response(&json!("rDDD")), Some("rDDD".into()));
    }

    #[test]
    fn address_rejects_empty_and_missing() {
        assert_eq!(address_from_response(&json!({"account": ""})), None);
        assert_eq!(address_from_response(&json!({})), None);
        assert_eq!(address_from_response(&Value::Null), None);
    }

    #[test]
    fn hash_probes_in_priority_order() {
        let res = json!({"txid": "T1", "hash": "H1"});
        assert_eq!(hash_from_response(&res), Some("T1".into()));
        assert_eq!(hash_from_response(&json!({"hash": "H2"})), Some("H2".into()));
        assert_eq!(
            hash_from_response(&json!({"result": {"hash": "H3"}})),
            Some("H3".into())
        );
        assert_eq!(hash_from_response(&json!({})), None);
    }

    #[test]
    fn network_accepts_object_or_string() {
        assert_eq!(network_from_response(&json!({"network": "testnet"})), Some("testnet".into()));
        assert_eq!(network_from_response(&json!("devnet")), Some("devnet".into()));
        assert_eq!(network_from_response(&Value::Null), None);
    }
}
