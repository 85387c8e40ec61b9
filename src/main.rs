use std::path::Path;
use std::sync::Arc;

use walletscreener::analyzer::{AnalysisParams, WalletAnalyzer};
use walletscreener::arguments;
use walletscreener::batch::BatchRunner;
use walletscreener::config::Settings;
use walletscreener::export;
use walletscreener::logger::{self, LogTag};
use walletscreener::pricing::{CoinGeckoOracle, FixedPriceOracle, PriceOracle};
use walletscreener::rpc::RpcClient;
use walletscreener::transactions::{TransactionClassifier, TransactionFetcher};

/// Main entry point for the wallet screener
///
/// Loads wallet addresses from CSV, analyzes each against the run-scoped
/// thresholds and exports the admitted wallets sorted by total PNL.
#[tokio::main]
async fn main() {
    // Environment file support for endpoint configuration
    dotenv::dotenv().ok();

    logger::init();

    if arguments::is_help_requested() {
        arguments::print_help();
        return;
    }

    logger::info(LogTag::System, "Starting wallet analysis...");

    let settings = Settings::from_env();
    let params = AnalysisParams::from_args();

    logger::info(
        LogTag::System,
        &format!(
            "RPC endpoint: {} | timeframe: {:?} | min capital: {} USD",
            settings.rpc_url, params.timeframe, params.minimum_wallet_capital
        ),
    );

    let rpc = match RpcClient::new(&settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            logger::error(LogTag::System, &format!("RPC client setup failed: {}", e));
            std::process::exit(1);
        }
    };

    let oracle: Arc<dyn PriceOracle> = match settings.price_override {
        Some(price) => {
            logger::warning(
                LogTag::Price,
                &format!("Using pinned SOL/USD rate: {:.2}", price),
            );
            Arc::new(FixedPriceOracle::new(price))
        }
        None => match CoinGeckoOracle::new(&settings) {
            Ok(oracle) => Arc::new(oracle),
            Err(e) => {
                logger::error(LogTag::System, &format!("Price oracle setup failed: {}", e));
                std::process::exit(1);
            }
        },
    };

    let fetcher = TransactionFetcher::new(rpc, settings.signature_page_size);
    let analyzer = WalletAnalyzer::new(fetcher, oracle, TransactionClassifier::new());
    let concurrency = arguments::get_arg_value_or("--concurrency", settings.max_concurrent_wallets);
    let runner = BatchRunner::new(Arc::new(analyzer), concurrency, settings.wallet_deadline);

    let input_path = arguments::get_arg_value("--wallets").unwrap_or_else(|| "addresses.csv".to_string());
    let output_path =
        arguments::get_arg_value("--output").unwrap_or_else(|| "analysis_results.csv".to_string());

    let addresses = match export::load_wallet_addresses(Path::new(&input_path)) {
        Ok(addresses) => addresses,
        Err(e) => {
            logger::error(LogTag::System, &e);
            std::process::exit(1);
        }
    };

    if addresses.is_empty() {
        logger::warning(LogTag::System, "No wallet addresses found. Exiting.");
        return;
    }

    let verdicts = runner.run(&addresses, &params).await;

    if let Err(e) = export::export_wallet_analysis(&verdicts, Path::new(&output_path)) {
        logger::error(LogTag::Export, &e);
        std::process::exit(1);
    }

    logger::info(
        LogTag::System,
        &format!(
            "Done: {}/{} wallets passed the analysis criteria",
            verdicts.len(),
            addresses.len()
        ),
    );
}
