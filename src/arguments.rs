/// Centralized argument handling for the wallet screener
///
/// This module consolidates all command-line argument parsing and debug flag
/// checking so that no other module touches `env::args()` directly.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Run-scoped analysis parameter flags with sane defaults
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

/// Parses the value following a flag, falling back to a default when the
/// flag is absent or the value does not parse
pub fn get_arg_value_or<T: std::str::FromStr>(flag: &str, default: T) -> T {
    match get_arg_value(flag) {
        Some(raw) => raw.parse().unwrap_or(default),
        None => default,
    }
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// RPC client debug mode
pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

/// Transaction fetcher debug mode
pub fn is_debug_fetcher_enabled() -> bool {
    has_arg("--debug-fetcher")
}

/// Wallet analyzer debug mode
pub fn is_debug_analyzer_enabled() -> bool {
    has_arg("--debug-analyzer")
}

/// Price oracle debug mode
pub fn is_debug_pricing_enabled() -> bool {
    has_arg("--debug-pricing")
}

/// Export/import debug mode
pub fn is_debug_export_enabled() -> bool {
    has_arg("--debug-export")
}

/// Verbose mode enables every debug tag at once
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Help requested via -h / --help
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Print active debug modes at startup so a log reader knows what to expect
pub fn print_debug_info() {
    let mut active = Vec::new();
    if is_debug_rpc_enabled() {
        active.push("rpc");
    }
    if is_debug_fetcher_enabled() {
        active.push("fetcher");
    }
    if is_debug_analyzer_enabled() {
        active.push("analyzer");
    }
    if is_debug_pricing_enabled() {
        active.push("pricing");
    }
    if is_debug_export_enabled() {
        active.push("export");
    }
    if is_verbose_enabled() {
        active.push("verbose");
    }
    if !active.is_empty() {
        println!("Debug modes enabled: {}", active.join(", "));
    }
}

/// Print CLI usage
pub fn print_help() {
    println!("walletscreener - Solana wallet PNL screener");
    println!();
    println!("USAGE:");
    println!("  walletscreener [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --wallets <file>          CSV of wallet addresses, first column (default: addresses.csv)");
    println!("  --output <file>           Output CSV path (default: analysis_results.csv)");
    println!("  --timeframe <code>        1|3|6|12 months, anything else = overall (default: 1)");
    println!("  --min-capital <usd>       Minimum wallet capital in USD (default: 1000)");
    println!("  --min-holding <minutes>   Minimum average holding period (default: 30)");
    println!("  --min-win-rate <pct>      Minimum win rate percentage (default: 50)");
    println!("  --min-pnl <usd>           Minimum total PNL (default: 100)");
    println!("  --concurrency <n>         Concurrent wallet analyses (default: 10)");
    println!();
    println!("DEBUG:");
    println!("  --debug-rpc --debug-fetcher --debug-analyzer --debug-pricing --debug-export");
    println!("  --verbose                 Enable all debug tags");
    println!();
    println!("ENVIRONMENT:");
    println!("  SOLANA_RPC_URL, HELIUS_RPC_URL, USE_HELIUS, PRICE_OVERRIDE");
}
