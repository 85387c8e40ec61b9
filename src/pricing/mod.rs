/// SOL/USD price oracle
///
/// The analyzer converts balances and trade amounts with the current spot
/// rate. A rate of 0.0 signals unavailability; the capital gate excludes
/// the wallet in that case rather than erroring.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::logger::{self, LogTag};

/// CoinGecko spot price endpoint for SOL in USD
pub const COINGECKO_SIMPLE_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd";

/// How long one fetched rate stays valid before the API is asked again
///
/// Per-transaction lookups inside one wallet's analysis hit this cache
/// instead of the API.
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(30);

#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Current SOL/USD spot rate; 0.0 signals unavailability
    async fn sol_usd_price(&self) -> f64;
}

struct CachedPrice {
    price: f64,
    fetched_at: Instant,
}

pub struct CoinGeckoOracle {
    http: Client,
    url: String,
    cache: RwLock<Option<CachedPrice>>,
    ttl: Duration,
}

impl CoinGeckoOracle {
    pub fn new(settings: &Settings) -> Result<Self, String> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http,
            url: COINGECKO_SIMPLE_PRICE_URL.to_string(),
            cache: RwLock::new(None),
            ttl: PRICE_CACHE_TTL,
        })
    }

    async fn fetch_fresh(&self) -> f64 {
        let response = match self.http.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                logger::warning(LogTag::Price, &format!("Price request failed: {}", e));
                return 0.0;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                logger::warning(LogTag::Price, &format!("Malformed price response: {}", e));
                return 0.0;
            }
        };

        match parse_simple_price(&body) {
            Some(price) => price,
            None => {
                logger::warning(LogTag::Price, "Error fetching SOL price in USD");
                0.0
            }
        }
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn sol_usd_price(&self) -> f64 {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return cached.price;
                }
            }
        }

        let price = self.fetch_fresh().await;
        if price > 0.0 {
            *self.cache.write().await = Some(CachedPrice {
                price,
                fetched_at: Instant::now(),
            });
            logger::debug(
                LogTag::Price,
                &format!("SOL/USD rate refreshed: {:.2}", price),
            );
        }
        price
    }
}

/// Pinned rate backing the PRICE_OVERRIDE toggle; also used by tests
pub struct FixedPriceOracle {
    price: f64,
}

impl FixedPriceOracle {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

#[async_trait]
impl PriceOracle for FixedPriceOracle {
    async fn sol_usd_price(&self) -> f64 {
        self.price
    }
}

/// Extract the solana/usd rate from a simple-price response body
pub fn parse_simple_price(body: &Value) -> Option<f64> {
    body.get("solana")?.get("usd")?.as_f64()
}

/// Converts an amount in SOL to USD; 0.0 when the rate is unavailable
pub async fn convert_to_usd(oracle: &dyn PriceOracle, amount_sol: f64) -> f64 {
    let price = oracle.sol_usd_price().await;
    if price > 0.0 {
        amount_sol * price
    } else {
        0.0
    }
}
