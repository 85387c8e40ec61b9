/// Structured error handling for the wallet screener
///
/// Failures are classified so the RPC retry loop can decide what to do with
/// them. None of these escalate past a wallet boundary: every failure mode
/// degrades to "skip this item" or "exclude this wallet" at the call site.

// =============================================================================
// RPC CALL FAILURES
// =============================================================================

#[derive(Debug, Clone)]
pub enum RpcCallError {
    /// Transport-level failure (connect error, timeout). Retried with backoff.
    Transport { message: String },

    /// HTTP 429 from the endpoint. Retried with backoff.
    RateLimited,

    /// Application error -32015: transaction version not supported.
    /// Permanent per-call skip; consumes no retry.
    UnsupportedTransactionVersion,

    /// Any other non-200 HTTP status. Logged, not retried.
    HttpStatus { status: u16 },

    /// Unrecognized server-reported application error. Logged, not retried.
    Application { code: i64, message: String },

    /// Response body was not valid JSON. Logged, not retried.
    MalformedResponse { message: String },
}

impl RpcCallError {
    /// Whether the retry loop should attempt this call again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RpcCallError::Transport { .. } | RpcCallError::RateLimited
        )
    }
}

impl std::fmt::Display for RpcCallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcCallError::Transport { message } => write!(f, "Transport failure: {}", message),
            RpcCallError::RateLimited => write!(f, "Rate limit exceeded (HTTP 429)"),
            RpcCallError::UnsupportedTransactionVersion => {
                write!(f, "Transaction version not supported")
            }
            RpcCallError::HttpStatus { status } => write!(f, "Unexpected HTTP status {}", status),
            RpcCallError::Application { code, message } => {
                write!(f, "RPC error {}: {}", code, message)
            }
            RpcCallError::MalformedResponse { message } => {
                write!(f, "Malformed response body: {}", message)
            }
        }
    }
}

impl std::error::Error for RpcCallError {}
