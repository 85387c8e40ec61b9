// =============================================================================
// CORE DATA STRUCTURES
// =============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::constants::LAMPORTS_PER_SOL;

/// Transaction type decided by the classification strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Buy,
    Sell,
    Transfer,
    Other,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Buy => "buy",
            TradeKind::Sell => "sell",
            TradeKind::Transfer => "transfer",
            TradeKind::Other => "other",
        }
    }
}

/// Full record for one signature, fetched lazily one round trip at a time
///
/// `raw` keeps the jsonParsed record so classification strategies can
/// inspect fields this struct does not lift out.
#[derive(Debug, Clone)]
pub struct TransactionDetail {
    pub signature: String,
    pub block_time: i64,
    pub fee: f64,
    pub token_id: Option<String>,
    pub raw: Value,
}

impl TransactionDetail {
    /// Parse a jsonParsed result; None when blockTime is missing
    pub fn from_value(signature: &str, raw: Value) -> Option<Self> {
        let block_time = raw.get("blockTime").and_then(Value::as_i64)?;
        let fee = raw.get("fee").and_then(Value::as_f64).unwrap_or(0.0);
        let token_id = raw
            .get("token_id")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            signature: signature.to_string(),
            block_time,
            fee,
            token_id,
            raw,
        })
    }

    /// Amount in SOL
    ///
    /// Smallest-unit form (`{"lamports": N}`) is divided by 10^9; a plain
    /// numeric amount is used as-is; anything else is zero.
    pub fn amount_sol(&self) -> f64 {
        match self.raw.get("amount") {
            Some(Value::Object(fields)) => fields
                .get("lamports")
                .and_then(Value::as_f64)
                .map(|lamports| lamports / LAMPORTS_PER_SOL as f64)
                .unwrap_or(0.0),
            Some(value) => value.as_f64().unwrap_or(0.0),
            None => 0.0,
        }
    }

    /// Whether a marker field is present in the raw record
    pub fn has_marker(&self, key: &str) -> bool {
        self.raw.get(key).is_some()
    }
}

/// Classified, normalized transaction; derived once and never mutated
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedTransaction {
    pub signature: String,
    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub timestamp: i64,
    pub amount: f64,
    pub fees: f64,
    pub net_amount: f64,
    pub token_id: Option<String>,
}
