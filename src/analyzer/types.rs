use serde::Serialize;

use crate::arguments;
use crate::transactions::TradeKind;

// =============================================================================
// RUN-SCOPED PARAMETERS
// =============================================================================

/// Analysis timeframe window
///
/// Codes follow the CLI convention: '1', '3', '6', '12' months; anything
/// else means no window at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    Overall,
}

impl Timeframe {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Timeframe::OneMonth,
            "3" => Timeframe::ThreeMonths,
            "6" => Timeframe::SixMonths,
            "12" => Timeframe::TwelveMonths,
            _ => Timeframe::Overall,
        }
    }

    /// Window width in days; None means unbounded
    pub fn window_days(&self) -> Option<i64> {
        match self {
            Timeframe::OneMonth => Some(30),
            Timeframe::ThreeMonths => Some(90),
            Timeframe::SixMonths => Some(180),
            Timeframe::TwelveMonths => Some(365),
            Timeframe::Overall => None,
        }
    }
}

/// Thresholds and window for one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisParams {
    pub timeframe: Timeframe,
    /// Minimum wallet capital in USD
    pub minimum_wallet_capital: f64,
    /// Minimum average holding period in minutes
    pub minimum_avg_holding_period: f64,
    /// Minimum win rate percentage
    pub minimum_win_rate: f64,
    /// Minimum total PNL in USD
    pub minimum_total_pnl: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::OneMonth,
            minimum_wallet_capital: 1000.0,
            minimum_avg_holding_period: 30.0,
            minimum_win_rate: 50.0,
            minimum_total_pnl: 100.0,
        }
    }
}

impl AnalysisParams {
    /// Run-scoped parameters from CLI flags, falling back to the defaults
    pub fn from_args() -> Self {
        let defaults = Self::default();
        Self {
            timeframe: Timeframe::from_code(
                &arguments::get_arg_value("--timeframe").unwrap_or_else(|| "1".to_string()),
            ),
            minimum_wallet_capital: arguments::get_arg_value_or(
                "--min-capital",
                defaults.minimum_wallet_capital,
            ),
            minimum_avg_holding_period: arguments::get_arg_value_or(
                "--min-holding",
                defaults.minimum_avg_holding_period,
            ),
            minimum_win_rate: arguments::get_arg_value_or(
                "--min-win-rate",
                defaults.minimum_win_rate,
            ),
            minimum_total_pnl: arguments::get_arg_value_or("--min-pnl", defaults.minimum_total_pnl),
        }
    }
}

// =============================================================================
// ANALYSIS STATE AND OUTPUT
// =============================================================================

/// One recorded buy/sell event with its wall-clock timestamp
#[derive(Debug, Clone, Serialize)]
pub struct TradeEvent {
    pub transaction: TradeKind,
    pub datetime: String,
}

/// Open position awaiting realization, keyed by token id in the accumulator
///
/// Created at buy, consumed by a matching transfer-out, or left open and
/// counted in unrealized PNL only.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionEntry {
    pub price: f64,
    pub amount: f64,
    pub timestamp: i64,
}

/// Terminal output of analysis for one admitted wallet
///
/// `total_pnl == realized_pnl + unrealized_pnl` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct WalletVerdict {
    pub address: String,
    pub total_pnl: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub win_rate: f64,
    pub buy_sell_dates: Vec<TradeEvent>,
    pub settings: AnalysisParams,
}

impl WalletVerdict {
    /// The "no activity" terminal state: a valid zero-valued verdict,
    /// distinct from a threshold exclusion
    pub fn zero(address: &str, params: &AnalysisParams) -> Self {
        Self {
            address: address.to_string(),
            total_pnl: 0.0,
            realized_pnl: 0.0,
            unrealized_pnl: 0.0,
            win_rate: 0.0,
            buy_sell_dates: Vec::new(),
            settings: params.clone(),
        }
    }
}

/// Why a wallet was kept out of the export; an outcome, not an error
#[derive(Debug, Clone, PartialEq)]
pub enum ExclusionReason {
    OracleUnavailable,
    InsufficientCapital { balance_usd: f64 },
    LowWinRate { win_rate: f64 },
    LowTotalPnl { total_pnl: f64 },
    ShortHoldingPeriod { minutes: f64 },
    DeadlineExceeded,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::OracleUnavailable => write!(f, "price oracle unavailable"),
            ExclusionReason::InsufficientCapital { balance_usd } => {
                write!(f, "insufficient capital ({:.2} USD)", balance_usd)
            }
            ExclusionReason::LowWinRate { win_rate } => {
                write!(f, "win rate {:.2}% below minimum", win_rate)
            }
            ExclusionReason::LowTotalPnl { total_pnl } => {
                write!(f, "total PNL {:.2} below minimum", total_pnl)
            }
            ExclusionReason::ShortHoldingPeriod { minutes } => {
                write!(f, "average holding period {:.2} min below minimum", minutes)
            }
            ExclusionReason::DeadlineExceeded => write!(f, "analysis deadline exceeded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_codes() {
        assert_eq!(Timeframe::from_code("1").window_days(), Some(30));
        assert_eq!(Timeframe::from_code("3").window_days(), Some(90));
        assert_eq!(Timeframe::from_code("6").window_days(), Some(180));
        assert_eq!(Timeframe::from_code("12").window_days(), Some(365));
        assert_eq!(Timeframe::from_code("overall").window_days(), None);
        assert_eq!(Timeframe::from_code("").window_days(), None);
    }

    #[test]
    fn test_settings_serialize_for_export() {
        let params = AnalysisParams::default();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"timeframe\":\"one_month\""));
        assert!(json.contains("\"minimum_win_rate\":50.0"));
    }
}
