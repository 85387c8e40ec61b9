use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::constants::UNSUPPORTED_TX_VERSION_CODE;
use crate::errors::RpcCallError;

// =============================================================================
// RETRY / BACKOFF POLICY
// =============================================================================

/// First backoff delay before a retried attempt
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Backoff ceiling
pub const MAX_BACKOFF: Duration = Duration::from_secs(32);

/// Next backoff delay: doubles until the ceiling
pub fn next_backoff(prev: Duration) -> Duration {
    std::cmp::min(prev * 2, MAX_BACKOFF)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// One entry from a getSignaturesForAddress page
///
/// `err` non-null means the transaction failed on chain and is excluded
/// from all downstream analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(rename = "blockTime", default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Result of one JSON-RPC call
///
/// `raw` carries the last response body for diagnostic inspection. It is
/// call-scoped by design: the client keeps no shared mutable last-response
/// state, so concurrent wallet workers cannot race on it.
#[derive(Debug, Clone, Default)]
pub struct RpcReply {
    pub result: Option<Value>,
    pub raw: Option<Value>,
}

impl RpcReply {
    /// The result payload, treating JSON null as absent
    pub fn into_result(self) -> Option<Value> {
        self.result.filter(|value| !value.is_null())
    }
}

// =============================================================================
// RESPONSE CLASSIFICATION
// =============================================================================

/// Classify one HTTP exchange before retry policy is applied
///
/// Order matters and mirrors the endpoint's observed behavior: rate limits
/// are reported by status alone, the unsupported-version application error
/// takes precedence over the success path, and only a clean 200 without an
/// error object yields a result.
pub fn classify_response(status: u16, body: &Value) -> Result<Option<Value>, RpcCallError> {
    if status == 429 {
        return Err(RpcCallError::RateLimited);
    }

    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        if code == UNSUPPORTED_TX_VERSION_CODE {
            return Err(RpcCallError::UnsupportedTransactionVersion);
        }
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        return Err(RpcCallError::Application { code, message });
    }

    if status == 200 {
        return Ok(body.get("result").cloned());
    }

    Err(RpcCallError::HttpStatus { status })
}
