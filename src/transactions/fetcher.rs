/// RPC fetching operations for the transactions module
///
/// Paginates signature history, resolves per-signature details and reads
/// wallet balances through the `SolanaRpc` seam. Every failure degrades to
/// partial data or "absent"; nothing here aborts a batch.
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::rpc::{lamports_to_sol, SignatureInfo, SolanaRpc};
use crate::transactions::types::TransactionDetail;
use crate::transactions::utils::{format_address_short, format_signature_short};

pub struct TransactionFetcher {
    rpc: Arc<dyn SolanaRpc>,
    page_size: usize,
}

impl TransactionFetcher {
    pub fn new(rpc: Arc<dyn SolanaRpc>, page_size: usize) -> Self {
        Self {
            rpc,
            page_size: page_size.max(1),
        }
    }

    /// Full signature history for a wallet, newest first
    ///
    /// Pages backward with a `before` cursor set to the last signature of
    /// the previous page; stops on an empty or short page. A failed page
    /// halts pagination and returns what was accumulated so far - partial
    /// results are valid, not an error.
    pub async fn fetch_history(&self, address: &str) -> Vec<SignatureInfo> {
        let mut all_transactions: Vec<SignatureInfo> = Vec::new();
        let mut before: Option<String> = None;

        loop {
            let page = match self
                .rpc
                .get_signatures_for_address(address, self.page_size, before.as_deref())
                .await
            {
                Some(page) => page,
                None => {
                    logger::warning(
                        LogTag::Fetch,
                        &format!(
                            "Error fetching transactions for {}, keeping {} fetched so far",
                            format_address_short(address),
                            all_transactions.len()
                        ),
                    );
                    break;
                }
            };

            if page.is_empty() {
                break;
            }

            let reached_end = page.len() < self.page_size;
            before = page.last().map(|info| info.signature.clone());
            all_transactions.extend(page);

            if reached_end {
                break;
            }
        }

        logger::info(
            LogTag::Fetch,
            &format!(
                "Fetched {} transactions for {}",
                all_transactions.len(),
                format_address_short(address)
            ),
        );
        all_transactions
    }

    /// Detailed record for one signature; absent on any failure or skip
    pub async fn fetch_detail(&self, signature: &str) -> Option<TransactionDetail> {
        let raw = self.rpc.get_transaction(signature).await?;

        match TransactionDetail::from_value(signature, raw) {
            Some(detail) => Some(detail),
            None => {
                logger::debug(
                    LogTag::Fetch,
                    &format!(
                        "Transaction {} has no blockTime, skipping",
                        format_signature_short(signature)
                    ),
                );
                None
            }
        }
    }

    /// Wallet balance in SOL; zero on failure
    pub async fn fetch_balance(&self, address: &str) -> f64 {
        match self.rpc.get_balance_lamports(address).await {
            Some(lamports) => lamports_to_sol(lamports),
            None => {
                logger::warning(
                    LogTag::Fetch,
                    &format!(
                        "Error fetching balance for {}",
                        format_address_short(address)
                    ),
                );
                0.0
            }
        }
    }

    /// Number of SPL token accounts owned by the wallet, for diagnostics
    pub async fn fetch_token_account_count(&self, address: &str) -> Option<usize> {
        let accounts = self.rpc.get_token_accounts(address).await?;
        Some(accounts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::{sig_info, StubRpc};
    use serde_json::json;

    const WALLET: &str = "WaLLetAddr1111111111111111111111111111111111";

    #[tokio::test]
    async fn test_pagination_two_pages_then_short() {
        let rpc = Arc::new(StubRpc::new());
        rpc.push_page(WALLET, Some(vec![sig_info("sig1", 300), sig_info("sig2", 200)]));
        rpc.push_page(WALLET, Some(vec![sig_info("sig3", 100)]));

        let fetcher = TransactionFetcher::new(rpc.clone(), 2);
        let history = fetcher.fetch_history(WALLET).await;

        // 2 items then a short page: exactly 2 requests, 3 items total
        assert_eq!(history.len(), 3);
        let cursors = rpc.recorded_cursors(WALLET);
        assert_eq!(cursors.len(), 2);
        assert_eq!(cursors[0], None);
        // The cursor is always the last signature of the prior page
        assert_eq!(cursors[1].as_deref(), Some("sig2"));
    }

    #[tokio::test]
    async fn test_pagination_stops_on_empty_page() {
        let rpc = Arc::new(StubRpc::new());
        rpc.push_page(WALLET, Some(vec![sig_info("sig1", 300), sig_info("sig2", 200)]));
        rpc.push_page(WALLET, Some(Vec::new()));

        let fetcher = TransactionFetcher::new(rpc.clone(), 2);
        let history = fetcher.fetch_history(WALLET).await;

        assert_eq!(history.len(), 2);
        assert_eq!(rpc.recorded_cursors(WALLET).len(), 2);
    }

    #[tokio::test]
    async fn test_page_failure_returns_partial_history() {
        let rpc = Arc::new(StubRpc::new());
        rpc.push_page(WALLET, Some(vec![sig_info("sig1", 300), sig_info("sig2", 200)]));
        rpc.push_page(WALLET, None);

        let fetcher = TransactionFetcher::new(rpc.clone(), 2);
        let history = fetcher.fetch_history(WALLET).await;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].signature, "sig1");
    }

    #[tokio::test]
    async fn test_empty_history() {
        let rpc = Arc::new(StubRpc::new());
        let fetcher = TransactionFetcher::new(rpc, 2);
        assert!(fetcher.fetch_history(WALLET).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_detail_absent_on_failure() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_detail("known", json!({"blockTime": 123, "amount": 1.0}));
        rpc.set_detail("no-time", json!({"amount": 1.0}));

        let fetcher = TransactionFetcher::new(rpc, 2);
        assert!(fetcher.fetch_detail("known").await.is_some());
        assert!(fetcher.fetch_detail("no-time").await.is_none());
        assert!(fetcher.fetch_detail("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_balance_converts_and_defaults() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 5_000_000_000);

        let fetcher = TransactionFetcher::new(rpc, 2);
        assert_eq!(fetcher.fetch_balance(WALLET).await, 5.0);
        assert_eq!(fetcher.fetch_balance("unknown-wallet").await, 0.0);
    }
}
