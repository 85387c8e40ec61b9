/// Process-wide configuration resolved once at startup
///
/// Endpoint URLs, retry bounds and concurrency limits are read from the
/// environment here and handed to the leaf components by reference. No
/// module reads the environment after `Settings::from_env()` returns.
use std::env;
use std::time::Duration;

/// Default public mainnet RPC endpoint, used when SOLANA_RPC_URL is unset
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Signatures requested per getSignaturesForAddress page (RPC maximum)
pub const DEFAULT_SIGNATURE_PAGE_SIZE: usize = 1000;

/// Additional attempts after a failed rate-limited or transport-failed call
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Concurrent wallet analyses in the batch runner
pub const DEFAULT_MAX_CONCURRENT_WALLETS: usize = 10;

/// Hard per-wallet analysis deadline in seconds
pub const DEFAULT_WALLET_DEADLINE_SECS: u64 = 300;

/// HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Settings {
    /// JSON-RPC endpoint the client posts to
    pub rpc_url: String,
    /// HTTP request timeout for RPC and oracle calls
    pub request_timeout: Duration,
    /// Page size for signature history pagination
    pub signature_page_size: usize,
    /// Additional attempts after the first failed call
    pub max_retries: u32,
    /// Wallets analyzed concurrently by the batch runner
    pub max_concurrent_wallets: usize,
    /// Hard deadline for one wallet's analysis
    pub wallet_deadline: Duration,
    /// Pinned SOL/USD rate; bypasses the live oracle when set
    pub price_override: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_SOLANA_RPC_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            signature_page_size: DEFAULT_SIGNATURE_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            max_concurrent_wallets: DEFAULT_MAX_CONCURRENT_WALLETS,
            wallet_deadline: Duration::from_secs(DEFAULT_WALLET_DEADLINE_SECS),
            price_override: None,
        }
    }
}

impl Settings {
    /// Build settings from the process environment
    ///
    /// USE_HELIUS toggles between HELIUS_RPC_URL and SOLANA_RPC_URL, matching
    /// the deployment convention of the screener's RPC providers. Unset or
    /// malformed values fall back to the defaults above.
    pub fn from_env() -> Self {
        let use_helius = env_flag("USE_HELIUS");

        let rpc_url = if use_helius {
            env::var("HELIUS_RPC_URL")
                .or_else(|_| env::var("SOLANA_RPC_URL"))
                .unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string())
        } else {
            env::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string())
        };

        Self {
            rpc_url,
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            signature_page_size: env_parse("SIGNATURE_PAGE_SIZE", DEFAULT_SIGNATURE_PAGE_SIZE),
            max_retries: env_parse("RPC_MAX_RETRIES", DEFAULT_MAX_RETRIES),
            max_concurrent_wallets: env_parse(
                "MAX_CONCURRENT_WALLETS",
                DEFAULT_MAX_CONCURRENT_WALLETS,
            ),
            wallet_deadline: Duration::from_secs(env_parse(
                "WALLET_DEADLINE_SECS",
                DEFAULT_WALLET_DEADLINE_SECS,
            )),
            price_override: env::var("PRICE_OVERRIDE")
                .ok()
                .and_then(|raw| raw.parse::<f64>().ok()),
        }
    }
}

/// True when the variable is set to a truthy marker ("1", "true", "yes")
fn env_flag(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Parse an environment variable, falling back to the default when unset or malformed
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.rpc_url, DEFAULT_SOLANA_RPC_URL);
        assert_eq!(settings.max_retries, 2);
        assert_eq!(settings.max_concurrent_wallets, 10);
        assert!(settings.price_override.is_none());
    }
}
