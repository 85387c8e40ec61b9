/// Batch runner: one analysis task per wallet, bounded concurrency
///
/// Wallets are mutually independent, so they run concurrently through a
/// buffered stream that preserves input order. Each wallet gets a hard
/// deadline; a timed-out or excluded wallet is logged and dropped, and the
/// batch always completes.
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

use crate::analyzer::{AnalysisParams, ExclusionReason, WalletAnalyzer, WalletVerdict};
use crate::logger::{self, LogTag};
use crate::transactions::utils::format_address_short;

pub struct BatchRunner {
    analyzer: Arc<WalletAnalyzer>,
    max_concurrent: usize,
    wallet_deadline: Duration,
}

impl BatchRunner {
    pub fn new(
        analyzer: Arc<WalletAnalyzer>,
        max_concurrent: usize,
        wallet_deadline: Duration,
    ) -> Self {
        Self {
            analyzer,
            max_concurrent: max_concurrent.max(1),
            wallet_deadline,
        }
    }

    /// Analyze every address and collect the admitted verdicts in input order
    pub async fn run(&self, addresses: &[String], params: &AnalysisParams) -> Vec<WalletVerdict> {
        let total = addresses.len();
        logger::info(
            LogTag::Batch,
            &format!(
                "Starting wallet analysis: {} wallets, {} concurrent",
                total, self.max_concurrent
            ),
        );

        let outcomes = stream::iter(addresses.iter().map(|address| {
            let analyzer = self.analyzer.clone();
            let params = params.clone();
            let deadline = self.wallet_deadline;

            async move {
                logger::info(
                    LogTag::Batch,
                    &format!("Analyzing wallet {}", format_address_short(address)),
                );

                let outcome =
                    match tokio::time::timeout(deadline, analyzer.analyze(address, &params)).await {
                        Ok(result) => result,
                        Err(_) => Err(ExclusionReason::DeadlineExceeded),
                    };

                match outcome {
                    Ok(verdict) => Some(verdict),
                    Err(reason) => {
                        logger::info(
                            LogTag::Batch,
                            &format!(
                                "Wallet {} excluded: {}",
                                format_address_short(address),
                                reason
                            ),
                        );
                        None
                    }
                }
            }
        }))
        .buffered(self.max_concurrent)
        .collect::<Vec<_>>()
        .await;

        let admitted: Vec<WalletVerdict> = outcomes.into_iter().flatten().collect();
        logger::info(
            LogTag::Batch,
            &format!("Analysis complete: {}/{} wallets admitted", admitted.len(), total),
        );
        admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Timeframe;
    use crate::pricing::FixedPriceOracle;
    use crate::rpc::testing::{sig_info, StubRpc};
    use crate::transactions::{TransactionClassifier, TransactionFetcher};
    use serde_json::json;

    fn runner_with(rpc: Arc<StubRpc>) -> BatchRunner {
        let analyzer = WalletAnalyzer::new(
            TransactionFetcher::new(rpc, 10),
            Arc::new(FixedPriceOracle::new(10.0)),
            TransactionClassifier::new(),
        );
        BatchRunner::new(Arc::new(analyzer), 4, Duration::from_secs(30))
    }

    fn permissive_params() -> AnalysisParams {
        AnalysisParams {
            timeframe: Timeframe::Overall,
            minimum_wallet_capital: 100.0,
            minimum_avg_holding_period: 0.0,
            minimum_win_rate: 0.0,
            minimum_total_pnl: 0.0,
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_drops_exclusions() {
        let rpc = Arc::new(StubRpc::new());

        // rich-1 and rich-2 pass the capital gate; poor-1 does not
        rpc.set_balance("rich-1", 100_000_000_000);
        rpc.set_balance("poor-1", 1_000_000_000);
        rpc.set_balance("rich-2", 100_000_000_000);

        let now = chrono::Utc::now().timestamp();
        rpc.push_page("rich-2", Some(vec![sig_info("sell-sig", now - 60)]));
        rpc.set_detail(
            "sell-sig",
            json!({"blockTime": now - 60, "sell_condition": true, "amount": 2.0}),
        );

        let runner = runner_with(rpc);
        let addresses = vec![
            "rich-1".to_string(),
            "poor-1".to_string(),
            "rich-2".to_string(),
        ];
        let verdicts = runner.run(&addresses, &permissive_params()).await;

        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].address, "rich-1");
        assert_eq!(verdicts[1].address, "rich-2");
        // rich-1 had no history: valid zero verdict, not an exclusion
        assert_eq!(verdicts[0].total_pnl, 0.0);
        assert_eq!(verdicts[1].realized_pnl, 20.0);
    }

    #[tokio::test]
    async fn test_empty_address_list() {
        let rpc = Arc::new(StubRpc::new());
        let runner = runner_with(rpc);
        let verdicts = runner.run(&[], &permissive_params()).await;
        assert!(verdicts.is_empty());
    }
}
