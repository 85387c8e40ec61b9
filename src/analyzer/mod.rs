/// Wallet analysis pipeline
///
/// Strictly sequential stages per wallet: capital gate, history retrieval,
/// per-transaction accumulation, derived metrics, threshold gates. Every
/// failure mode degrades to "skip this transaction" or "exclude this
/// wallet"; nothing here aborts the batch.
pub mod metrics;
pub mod types;

use chrono::Utc;
use std::sync::Arc;

use crate::arguments;
use crate::logger::{self, LogTag};
use crate::pricing::PriceOracle;
use crate::transactions::utils::{format_address_short, format_signature_short};
use crate::transactions::{TransactionClassifier, TransactionFetcher};
use metrics::{average_holding_period_minutes, is_within_timeframe, PnlAccumulator};

pub use types::{AnalysisParams, ExclusionReason, Timeframe, TradeEvent, WalletVerdict};

pub struct WalletAnalyzer {
    fetcher: TransactionFetcher,
    oracle: Arc<dyn PriceOracle>,
    classifier: TransactionClassifier,
}

impl WalletAnalyzer {
    pub fn new(
        fetcher: TransactionFetcher,
        oracle: Arc<dyn PriceOracle>,
        classifier: TransactionClassifier,
    ) -> Self {
        Self {
            fetcher,
            oracle,
            classifier,
        }
    }

    /// Analyze one wallet against the run parameters
    ///
    /// `Err` carries the exclusion reason; a wallet with no history at all
    /// yields a zero-valued verdict instead, which is a valid result.
    pub async fn analyze(
        &self,
        address: &str,
        params: &AnalysisParams,
    ) -> Result<WalletVerdict, ExclusionReason> {
        self.check_wallet_capital(address, params).await?;

        if arguments::is_debug_analyzer_enabled() {
            if let Some(count) = self.fetcher.fetch_token_account_count(address).await {
                logger::debug(
                    LogTag::Analyzer,
                    &format!(
                        "Wallet {} owns {} token accounts",
                        format_address_short(address),
                        count
                    ),
                );
            }
        }

        let history = self.fetcher.fetch_history(address).await;
        if history.is_empty() {
            logger::info(
                LogTag::Analyzer,
                &format!(
                    "No transactions found for wallet {}",
                    format_address_short(address)
                ),
            );
            return Ok(WalletVerdict::zero(address, params));
        }

        let now = Utc::now();
        let mut accumulator = PnlAccumulator::new();

        for entry in &history {
            if entry.err.is_some() {
                logger::debug(
                    LogTag::Analyzer,
                    &format!(
                        "Skipping transaction {} due to errors",
                        format_signature_short(&entry.signature)
                    ),
                );
                continue;
            }

            let Some(detail) = self.fetcher.fetch_detail(&entry.signature).await else {
                logger::debug(
                    LogTag::Analyzer,
                    &format!(
                        "Error fetching details for transaction {}",
                        format_signature_short(&entry.signature)
                    ),
                );
                continue;
            };

            if !is_within_timeframe(detail.block_time, params.timeframe, now) {
                continue;
            }

            let classified = self.classifier.classify(&detail);
            let price = self.oracle.sol_usd_price().await;
            accumulator.apply(&classified, price);
        }

        let realized_pnl = accumulator.realized_pnl;
        let unrealized_pnl = accumulator.unrealized_pnl;
        let total_pnl = accumulator.total_pnl();
        let win_rate = accumulator.win_rate();

        if win_rate < params.minimum_win_rate {
            return Err(ExclusionReason::LowWinRate { win_rate });
        }
        if total_pnl < params.minimum_total_pnl {
            return Err(ExclusionReason::LowTotalPnl { total_pnl });
        }

        let avg_holding = average_holding_period_minutes(&accumulator.buy_sell_dates);
        if avg_holding < params.minimum_avg_holding_period {
            return Err(ExclusionReason::ShortHoldingPeriod {
                minutes: avg_holding,
            });
        }

        Ok(WalletVerdict {
            address: address.to_string(),
            total_pnl,
            realized_pnl,
            unrealized_pnl,
            win_rate,
            buy_sell_dates: accumulator.buy_sell_dates,
            settings: params.clone(),
        })
    }

    /// Capital gate: fiat value of the native balance against the minimum
    async fn check_wallet_capital(
        &self,
        address: &str,
        params: &AnalysisParams,
    ) -> Result<(), ExclusionReason> {
        let balance_sol = self.fetcher.fetch_balance(address).await;
        let rate = self.oracle.sol_usd_price().await;

        if rate == 0.0 {
            return Err(ExclusionReason::OracleUnavailable);
        }

        let balance_usd = balance_sol * rate;
        logger::info(
            LogTag::Analyzer,
            &format!(
                "Wallet {} balance: {:.2} USD ({:.2} SOL)",
                format_address_short(address),
                balance_usd,
                balance_sol
            ),
        );

        if balance_usd < params.minimum_wallet_capital {
            return Err(ExclusionReason::InsufficientCapital { balance_usd });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::FixedPriceOracle;
    use crate::rpc::testing::{failed_sig_info, sig_info, StubRpc};
    use serde_json::json;

    const WALLET: &str = "WaLLetAddr1111111111111111111111111111111111";

    fn analyzer_with(rpc: Arc<StubRpc>, price: f64) -> WalletAnalyzer {
        WalletAnalyzer::new(
            TransactionFetcher::new(rpc, 10),
            Arc::new(FixedPriceOracle::new(price)),
            TransactionClassifier::new(),
        )
    }

    fn overall_params() -> AnalysisParams {
        AnalysisParams {
            timeframe: Timeframe::Overall,
            minimum_wallet_capital: 1000.0,
            minimum_avg_holding_period: 30.0,
            minimum_win_rate: 50.0,
            minimum_total_pnl: 0.0,
        }
    }

    #[tokio::test]
    async fn test_capital_gate_excludes_before_history_fetch() {
        let rpc = Arc::new(StubRpc::new());
        // 5 SOL at 20 USD = 100 USD, below the 150 minimum
        rpc.set_balance(WALLET, 5_000_000_000);

        let analyzer = analyzer_with(rpc.clone(), 20.0);
        let params = AnalysisParams {
            minimum_wallet_capital: 150.0,
            ..overall_params()
        };

        let result = analyzer.analyze(WALLET, &params).await;
        match result {
            Err(ExclusionReason::InsufficientCapital { balance_usd }) => {
                assert_eq!(balance_usd, 100.0)
            }
            other => panic!("expected capital exclusion, got {:?}", other),
        }
        // Excluded before any history page was requested
        assert!(rpc.recorded_cursors(WALLET).is_empty());
    }

    #[tokio::test]
    async fn test_oracle_failure_excludes_wallet() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 5_000_000_000);

        let analyzer = analyzer_with(rpc, 0.0);
        let result = analyzer.analyze(WALLET, &overall_params()).await;
        assert_eq!(result.unwrap_err(), ExclusionReason::OracleUnavailable);
    }

    #[tokio::test]
    async fn test_empty_history_yields_zero_verdict() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000); // 500 SOL

        let analyzer = analyzer_with(rpc, 10.0);
        let verdict = analyzer.analyze(WALLET, &overall_params()).await.unwrap();

        assert_eq!(verdict.total_pnl, 0.0);
        assert_eq!(verdict.realized_pnl, 0.0);
        assert_eq!(verdict.unrealized_pnl, 0.0);
        assert_eq!(verdict.win_rate, 0.0);
        assert!(verdict.buy_sell_dates.is_empty());
    }

    #[tokio::test]
    async fn test_full_pipeline_buy_then_sell() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000);

        let now = Utc::now().timestamp();
        let buy_time = now - 7200;
        let sell_time = buy_time + 5400; // 90 minutes later

        rpc.push_page(
            WALLET,
            Some(vec![sig_info("buy-sig", buy_time), sig_info("sell-sig", sell_time)]),
        );
        rpc.set_detail(
            "buy-sig",
            json!({"blockTime": buy_time, "buy_condition": true, "amount": 5.0, "token_id": "tok"}),
        );
        rpc.set_detail(
            "sell-sig",
            json!({"blockTime": sell_time, "sell_condition": true, "amount": 8.0}),
        );

        let analyzer = analyzer_with(rpc, 10.0);
        let verdict = analyzer.analyze(WALLET, &overall_params()).await.unwrap();

        assert_eq!(verdict.unrealized_pnl, -50.0);
        assert_eq!(verdict.realized_pnl, 80.0);
        assert_eq!(verdict.total_pnl, 30.0);
        assert_eq!(
            verdict.total_pnl,
            verdict.realized_pnl + verdict.unrealized_pnl
        );
        assert_eq!(verdict.win_rate, 50.0);
        assert_eq!(verdict.buy_sell_dates.len(), 2);
        assert_eq!(verdict.buy_sell_dates[0].transaction.as_str(), "buy");
        assert_eq!(verdict.buy_sell_dates[1].transaction.as_str(), "sell");
    }

    #[tokio::test]
    async fn test_error_flagged_and_unfetchable_transactions_are_skipped() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000);

        let now = Utc::now().timestamp();
        rpc.push_page(
            WALLET,
            Some(vec![
                failed_sig_info("errored-sig", now - 600),
                sig_info("no-detail-sig", now - 500),
                sig_info("sell-sig", now - 400),
            ]),
        );
        // No detail seeded for "no-detail-sig": the fetch fails, the loop continues
        rpc.set_detail(
            "sell-sig",
            json!({"blockTime": now - 400, "sell_condition": true, "amount": 3.0}),
        );

        let analyzer = analyzer_with(rpc, 10.0);
        let params = AnalysisParams {
            minimum_win_rate: 100.0,
            minimum_avg_holding_period: 0.0,
            ..overall_params()
        };
        let verdict = analyzer.analyze(WALLET, &params).await.unwrap();

        // Only the sell survived: 1 trade, profitable, win rate 100
        assert_eq!(verdict.realized_pnl, 30.0);
        assert_eq!(verdict.win_rate, 100.0);
    }

    #[tokio::test]
    async fn test_out_of_window_transactions_are_skipped() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000);

        let now = Utc::now().timestamp();
        let stale = now - 60 * 86_400; // 60 days old
        rpc.push_page(WALLET, Some(vec![sig_info("stale-sig", stale)]));
        rpc.set_detail(
            "stale-sig",
            json!({"blockTime": stale, "sell_condition": true, "amount": 3.0}),
        );

        let analyzer = analyzer_with(rpc, 10.0);
        let params = AnalysisParams {
            timeframe: Timeframe::OneMonth,
            minimum_win_rate: 0.0,
            minimum_avg_holding_period: 0.0,
            minimum_total_pnl: 0.0,
            minimum_wallet_capital: 1000.0,
        };
        let verdict = analyzer.analyze(WALLET, &params).await.unwrap();

        // Nothing counted: the only transaction predates the window
        assert_eq!(verdict.realized_pnl, 0.0);
        assert_eq!(verdict.win_rate, 0.0);
        assert!(verdict.buy_sell_dates.is_empty());
    }

    #[tokio::test]
    async fn test_threshold_gates_apply_in_order() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000);

        let now = Utc::now().timestamp();
        rpc.push_page(WALLET, Some(vec![sig_info("other-sig", now - 600)]));
        rpc.set_detail("other-sig", json!({"blockTime": now - 600, "memo": "nothing"}));

        let analyzer = analyzer_with(rpc, 10.0);
        // Win rate 0 fails first even though total PNL also fails
        let params = AnalysisParams {
            minimum_win_rate: 50.0,
            minimum_total_pnl: 100.0,
            ..overall_params()
        };
        let result = analyzer.analyze(WALLET, &params).await;
        assert!(matches!(
            result.unwrap_err(),
            ExclusionReason::LowWinRate { .. }
        ));
    }

    #[tokio::test]
    async fn test_short_holding_period_excludes() {
        let rpc = Arc::new(StubRpc::new());
        rpc.set_balance(WALLET, 500_000_000_000);

        let now = Utc::now().timestamp();
        let buy_time = now - 600;
        let sell_time = buy_time + 300; // 5 minutes
        rpc.push_page(
            WALLET,
            Some(vec![sig_info("buy-sig", buy_time), sig_info("sell-sig", sell_time)]),
        );
        rpc.set_detail(
            "buy-sig",
            json!({"blockTime": buy_time, "buy_condition": true, "amount": 1.0, "token_id": "tok"}),
        );
        rpc.set_detail(
            "sell-sig",
            json!({"blockTime": sell_time, "sell_condition": true, "amount": 2.0}),
        );

        let analyzer = analyzer_with(rpc, 10.0);
        let result = analyzer.analyze(WALLET, &overall_params()).await;
        assert!(matches!(
            result.unwrap_err(),
            ExclusionReason::ShortHoldingPeriod { .. }
        ));
    }
}
