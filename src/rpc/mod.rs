/// Centralized RPC access for the wallet screener
///
/// The `SolanaRpc` trait is the seam between the analysis pipeline and the
/// network: production code talks to `RpcClient`, tests substitute the
/// in-memory stub from `testing`.
use async_trait::async_trait;
use serde_json::Value;

pub mod client;
#[cfg(test)]
pub mod testing;
pub mod types;

pub use client::RpcClient;
pub use types::{next_backoff, RpcReply, SignatureInfo, INITIAL_BACKOFF, MAX_BACKOFF};

use crate::constants::LAMPORTS_PER_SOL;

/// Typed JSON-RPC surface used by the transaction fetcher
///
/// Every method returns `None` on any failure or permanent skip; callers
/// treat that as "skip this item" and never abort the batch over it.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// One page of signature history, newest first
    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
        before: Option<&str>,
    ) -> Option<Vec<SignatureInfo>>;

    /// Full jsonParsed transaction record for one signature
    async fn get_transaction(&self, signature: &str) -> Option<Value>;

    /// Account balance in lamports
    async fn get_balance_lamports(&self, address: &str) -> Option<u64>;

    /// SPL token accounts owned by the address
    async fn get_token_accounts(&self, address: &str) -> Option<Vec<Value>>;
}

/// Converts lamports to SOL amount
pub fn lamports_to_sol(lamports: u64) -> f64 {
    (lamports as f64) / (LAMPORTS_PER_SOL as f64)
}

/// Converts SOL amount to lamports (1 SOL = 1,000,000,000 lamports)
pub fn sol_to_lamports(sol_amount: f64) -> u64 {
    (sol_amount * (LAMPORTS_PER_SOL as f64)) as u64
}
