/// JSON-RPC client for the Solana endpoint
///
/// Posts JSON-RPC 2.0 envelopes with a fixed request id and applies the
/// retry policy: rate limits (HTTP 429) and transport failures are retried
/// with exponential backoff, the unsupported-transaction-version error is a
/// permanent per-call skip, everything else is logged and returned as "no
/// result". Callers treat "no result" as "skip this item, continue".
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::sleep;

use super::types::{classify_response, next_backoff, RpcReply, SignatureInfo, INITIAL_BACKOFF};
use super::SolanaRpc;
use crate::config::Settings;
use crate::constants::{JSONRPC_REQUEST_ID, TOKEN_PROGRAM_ID};
use crate::errors::RpcCallError;
use crate::logger::{self, LogTag};

pub struct RpcClient {
    http: Client,
    endpoint: String,
    max_retries: u32,
}

impl RpcClient {
    pub fn new(settings: &Settings) -> Result<Self, String> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http,
            endpoint: settings.rpc_url.clone(),
            max_retries: settings.max_retries,
        })
    }

    /// POST one JSON-RPC call, retrying rate limits and transport failures
    ///
    /// The reply carries the last raw response body for diagnostics; it is
    /// call-scoped, never stored on the client.
    pub async fn call(&self, method: &str, params: Value) -> RpcReply {
        let envelope = json!({
            "jsonrpc": "2.0",
            "id": JSONRPC_REQUEST_ID,
            "method": method,
            "params": params,
        });

        let mut backoff = INITIAL_BACKOFF;
        let mut retries_used = 0u32;

        loop {
            let (raw, err) = match self.http.post(&self.endpoint).json(&envelope).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.json::<Value>().await {
                        Ok(body) => match classify_response(status, &body) {
                            Ok(result) => {
                                return RpcReply {
                                    result,
                                    raw: Some(body),
                                };
                            }
                            Err(err) => (Some(body), err),
                        },
                        Err(e) => (
                            None,
                            RpcCallError::MalformedResponse {
                                message: e.to_string(),
                            },
                        ),
                    }
                }
                Err(e) => (
                    None,
                    RpcCallError::Transport {
                        message: e.to_string(),
                    },
                ),
            };

            // Permanent per-call skip: no retry consumed, caller sees "no result"
            if matches!(err, RpcCallError::UnsupportedTransactionVersion) {
                logger::debug(
                    LogTag::Rpc,
                    &format!("{}: transaction version not supported, skipping", method),
                );
                return RpcReply { result: None, raw };
            }

            if !err.is_retryable() {
                logger::warning(LogTag::Rpc, &format!("{}: {}", method, err));
                return RpcReply { result: None, raw };
            }

            if retries_used >= self.max_retries {
                logger::warning(
                    LogTag::Rpc,
                    &format!("{}: exceeded retry limit, skipping ({})", method, err),
                );
                return RpcReply { result: None, raw };
            }

            retries_used += 1;
            logger::warning(
                LogTag::Rpc,
                &format!(
                    "{} failed (attempt {}/{}), retrying in {}s: {}",
                    method,
                    retries_used,
                    self.max_retries,
                    backoff.as_secs(),
                    err
                ),
            );
            sleep(backoff).await;
            backoff = next_backoff(backoff);
        }
    }
}

#[async_trait]
impl SolanaRpc for RpcClient {
    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Option<Vec<SignatureInfo>> {
        let mut options = json!({ "limit": limit });
        if let Some(cursor) = before {
            options["before"] = json!(cursor);
        }

        let reply = self
            .call("getSignaturesForAddress", json!([address, options]))
            .await;
        let result = reply.into_result()?;

        match serde_json::from_value(result) {
            Ok(page) => Some(page),
            Err(e) => {
                logger::warning(
                    LogTag::Rpc,
                    &format!("getSignaturesForAddress: unexpected result shape: {}", e),
                );
                None
            }
        }
    }

    async fn get_transaction(&self, signature: &str) -> Option<Value> {
        let reply = self
            .call(
                "getTransaction",
                json!([signature, { "encoding": "jsonParsed" }]),
            )
            .await;
        reply.into_result()
    }

    async fn get_balance_lamports(&self, address: &str) -> Option<u64> {
        let reply = self.call("getBalance", json!([address])).await;
        reply.into_result()?.get("value")?.as_u64()
    }

    async fn get_token_accounts(&self, address: &str) -> Option<Vec<Value>> {
        let reply = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    address,
                    { "programId": TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed" }
                ]),
            )
            .await;
        let result = reply.into_result()?;
        result.get("value")?.as_array().cloned()
    }
}
