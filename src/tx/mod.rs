//! Transaction builders - pure payload shaping, no I/O, no signing.
//!
//! Each builder takes primitive parameters and returns a fully-formed
//! [`TransactionPayload`] ready to hand to a wallet adapter. Builders do not
//! validate inputs or enforce ordering constraints; a malformed input yields
//! a malformed payload.
//!
//! | Builder | TransactionType | Purpose |
//! |---------|-----------------|---------|
//! | [`trust_set`] | TrustSet | authorize holding the issued asset |
//! | [`deposit`] | Payment | move issued funds into the pool |
//! | [`escrow_create`] | EscrowCreate | time-locked XRP collateral |
//! | [`repay`] | Payment | issued funds back to the pool, memo-tagged |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Drops per XRP. Fixed ledger scale.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Default trust-line credit limit when the caller has no preference.
pub const DEFAULT_TRUST_LIMIT: &str = "1000000";

/// An XRPL transaction payload. Known fields are typed; anything else rides
/// in `extra`. Produced fresh per operation, never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(rename = "TransactionType")]
    pub transaction_type: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Destination", skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(rename = "LimitAmount", skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Amount>,
    #[serde(rename = "Fee", skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(rename = "Sequence", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "LastLedgerSequence", skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,
    #[serde(rename = "Memos", skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoEnvelope>>,
    #[serde(rename = "FinishAfter", skip_serializing_if = "Option::is_none")]
    pub finish_after: Option<u64>,
    #[serde(rename = "CancelAfter", skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionPayload {
    fn new(transaction_type: &str, account: impl Into<String>) -> Self {
        Self {
            transaction_type: transaction_type.into(),
            account: account.into(),
            destination: None,
            amount: None,
            limit_amount: None,
            fee: None,
            sequence: None,
            last_ledger_sequence: None,
            memos: None,
            finish_after: None,
            cancel_after: None,
            extra: Map::new(),
        }
    }

    /// Wire form, as handed to an adapter for signing.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Amount field: native drops scalar or issued-currency triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Native XRP, denominated in drops, as a decimal string.
    Drops(String),
    Issued(IssuedAmount),
}

/// Issued-currency amount. Currency code and issuer must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

impl IssuedAmount {
    pub fn new(currency: impl Into<String>, issuer: impl Into<String>, value: impl Into<String>) -> Self {
        Self { currency: currency.into(), issuer: issuer.into(), value: value.into() }
    }
}

/// XRPL memo wire wrapper: `{"Memo": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoEnvelope {
    #[serde(rename = "Memo")]
    pub memo: Memo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    #[serde(rename = "MemoType", skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(rename = "MemoData", skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(rename = "MemoFormat", skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

/// Build a memo from plain-text type and data tags. XRPL memo fields are
/// uppercase hex on the wire.
pub fn memo_tag(memo_type: &str, memo_data: &str) -> MemoEnvelope {
    MemoEnvelope {
        memo: Memo {
            memo_type: Some(hex::encode_upper(memo_type.as_bytes())),
            memo_data: Some(hex::encode_upper(memo_data.as_bytes())),
            memo_format: None,
        },
    }
}

/// Trust line: authorize `account` to hold up to `limit` units of the asset
/// issued by `issuer`. The limit string is carried verbatim.
pub fn trust_set(
    account: &str,
    currency: &str,
    issuer: &str,
    limit: &str,
) -> TransactionPayload {
    let mut tx = TransactionPayload::new("TrustSet", account);
    tx.limit_amount = Some(Amount::Issued(IssuedAmount::new(currency, issuer, limit)));
    tx
}

/// LP deposit: pay an issued-currency amount into the pool account.
pub fn deposit(account: &str, pool: &str, amount: IssuedAmount) -> TransactionPayload {
    let mut tx = TransactionPayload::new("Payment", account);
    tx.destination = Some(pool.into());
    tx.amount = Some(Amount::Issued(amount));
    tx.memos = Some(vec![memo_tag("XLP", "DEPOSIT")]);
    tx
}

/// Collateral lock: escrow `drops` of native XRP to the pool, releasable
/// after `finish_after` and reclaimable after `cancel_after` (ledger epoch
/// seconds). Ordering `finish_after < cancel_after` is the caller's
/// responsibility; both fields are copied verbatim.
pub fn escrow_create(
    borrower: &str,
    pool: &str,
    drops: &str,
    finish_after: u64,
    cancel_after: u64,
) -> TransactionPayload {
    let mut tx = TransactionPayload::new("EscrowCreate", borrower);
    tx.destination = Some(pool.into());
    tx.amount = Some(Amount::Drops(drops.into()));
    tx.finish_after = Some(finish_after);
    tx.cancel_after = Some(cancel_after);
    tx
}

/// Loan repayment: same shape as a deposit, distinguished only by memo.
pub fn repay(account: &str, pool: &str, amount: IssuedAmount) -> TransactionPayload {
    let mut tx = TransactionPayload::new("Payment", account);
    tx.destination = Some(pool.into());
    tx.amount = Some(Amount::Issued(amount));
    tx.memos = Some(vec![memo_tag("REPAY", "LOAN")]);
    tx
}

/// XRP to drops. Drops are integral; the result is rounded to the nearest
/// drop and rendered as a decimal string.
pub fn xrp_to_drops(xrp: f64) -> String {
    ((xrp * DROPS_PER_XRP as f64).round() as u64).to_string()
}

/// Drops to XRP. Unparsable input yields NaN (garbage in, garbage out).
pub fn drops_to_xrp(drops: &str) -> f64 {
    drops.parse::<f64>().unwrap_or(f64::NAN) / DROPS_PER_XRP as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSUER: &str = "rISSUERxxxxxxxxxxxxxxxxxxxxxxxxxxx";
    const POOL: &str = "rPOOLxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";

    #[test]
    fn trust_set_preserves_limit_and_issuer() {
        let tx = trust_set("rACCT", "RLUSD", ISSUER, "2500.75");
        assert_eq!(tx.transaction_type, "TrustSet");
        match tx.limit_amount.as_ref().expect("limit") {
            Amount::Issued(a) => {
                assert_eq!(a.issuer, ISSUER);
                assert_eq!(a.currency, "RLUSD");
                // String-preserving: no numeric reformatting
                assert_eq!(a.value, "2500.75");
            }
            Amount::Drops(_) => panic!("trust line limit must be issued-currency"),
        }
        assert!(tx.amount.is_none());
        assert!(tx.destination.is_none());
    }

    #[test]
    fn trust_set_wire_shape() {
        let tx = trust_set("rACCT", "RLUSD", ISSUER, DEFAULT_TRUST_LIMIT);
        let v = tx.to_value();
        assert_eq!(v["TransactionType"], "TrustSet");
        assert_eq!(v["Account"], "rACCT");
        assert_eq!(
            v["LimitAmount"],
            json!({"currency": "RLUSD", "issuer": ISSUER, "value": "1000000"})
        );
        // Absent optionals stay off the wire
        assert!(v.get("Destination").is_none());
        assert!(v.get("Memos").is_none());
    }

    #[test]
    fn deposit_and_repay_differ_only_by_memo() {
        let amount = IssuedAmount::new("RLUSD", ISSUER, "100");
        let dep = deposit("rACCT", POOL, amount.clone());
        let rep = repay("rACCT", POOL, amount);

        assert_eq!(dep.transaction_type, "Payment");
        assert_eq!(rep.transaction_type, "Payment");
        assert_eq!(dep.destination, rep.destination);
        assert_eq!(dep.amount, rep.amount);
        assert_ne!(dep.memos, rep.memos);

        let dep_memos = dep.memos.unwrap();
        let dep_memo = &dep_memos[0].memo;
        assert_eq!(dep_memo.memo_type.as_deref(), Some("584C50")); // "XLP"
        assert_eq!(dep_memo.memo_data.as_deref(), Some("4445504F534954")); // "DEPOSIT"

        let rep_memos = rep.memos.unwrap();
        let rep_memo = &rep_memos[0].memo;
        assert_eq!(rep_memo.memo_type.as_deref(), Some("5245504159")); // "REPAY"
        assert_eq!(rep_memo.memo_data.as_deref(), Some("4C4F414E")); // "LOAN"
    }

    #[test]
    fn escrow_copies_time_bounds_verbatim() {
        let tx = escrow_create("rBORROW", POOL, "5000000", 1_000, 2_000);
        assert_eq!(tx.finish_after, Some(1_000));
        assert_eq!(tx.cancel_after, Some(2_000));
        assert_eq!(tx.amount, Some(Amount::Drops("5000000".into())));
    }

    #[test]
    fn escrow_does_not_validate_window_ordering() {
        // Ordering is the caller's responsibility; the builder must not
        // reject or reorder an inverted window.
        let tx = escrow_create("rBORROW", POOL, "1", 2_000, 1_000);
        assert_eq!(tx.finish_after, Some(2_000));
        assert_eq!(tx.cancel_after, Some(1_000));
    }

    #[test]
    fn drops_conversion_round_trips() {
        for xrp in [0.0, 0.000001, 1.0, 1.5, 25.123456, 100_000.0] {
            let drops = xrp_to_drops(xrp);
            let back = drops_to_xrp(&drops);
            assert!((back - xrp).abs() < 1e-9, "{} -> {} -> {}", xrp, drops, back);
        }
        assert_eq!(xrp_to_drops(1.5), "1500000");
        assert_eq!(drops_to_xrp("2500000"), 2.5);
        assert!(drops_to_xrp("not-a-number").is_nan());
    }

    #[test]
    fn amount_serde_shapes() {
        let drops = Amount::Drops("42".into());
        assert_eq!(serde_json::to_value(&drops).unwrap(), json!("42"));

        let issued = Amount::Issued(IssuedAmount::new("RLUSD", ISSUER, "9.99"));
        let v = serde_json::to_value(&issued).unwrap();
        assert_eq!(v["currency"], "RLUSD");

        let parsed: Amount = serde_json::from_value(json!("77")).unwrap();
        assert_eq!(parsed, Amount::Drops("77".into()));
    }

    #[test]
    fn payload_round_trips_with_extra_fields() {
        let mut tx = escrow_create("rBORROW", POOL, "9", 1, 2);
        tx.extra.insert("Condition".into(), json!("A0258020"));
        let v = tx.to_value();
        assert_eq!(v["Condition"], "A0258020");
        let back: TransactionPayload = serde_json::from_value(v).unwrap();
        assert_eq!(back, tx);
    }
}
