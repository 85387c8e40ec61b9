/// PNL, win-rate and holding-period arithmetic
///
/// Pure state folded per transaction; the analyzer drives it in fetched
/// order and reads the derived metrics at the end.
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::collections::HashMap;

use super::types::{PositionEntry, Timeframe, TradeEvent};
use crate::transactions::{ClassifiedTransaction, TradeKind};

/// Wall-clock format used for recorded trade events
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a unix block time for event records
pub fn format_block_time(block_time: i64) -> String {
    match Local.timestamp_opt(block_time, 0).single() {
        Some(datetime) => datetime.format(EVENT_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Whether a transaction falls inside the requested window
pub fn is_within_timeframe(block_time: i64, timeframe: Timeframe, now: DateTime<Utc>) -> bool {
    let days = match timeframe.window_days() {
        Some(days) => days,
        None => return true,
    };
    let tx_time = match Utc.timestamp_opt(block_time, 0).single() {
        Some(tx_time) => tx_time,
        None => return false,
    };
    now.signed_duration_since(tx_time).num_days() <= days
}

/// Running totals for one wallet's analysis
///
/// Owns the open-position map for the duration of one wallet; discarded
/// when that wallet's analysis completes.
#[derive(Debug, Default)]
pub struct PnlAccumulator {
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub profitable_trades: u64,
    pub total_trades: u64,
    pub buy_sell_dates: Vec<TradeEvent>,
    open_positions: HashMap<String, PositionEntry>,
}

impl PnlAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified transaction into the running totals
    ///
    /// Buys open a position and depress unrealized PNL; sells realize
    /// proceeds at the current rate; transfers close the matching open
    /// position the way a sell would. Every considered transaction counts
    /// toward the trade total, classified or not.
    pub fn apply(&mut self, tx: &ClassifiedTransaction, price: f64) {
        match tx.kind {
            TradeKind::Buy => {
                self.unrealized_pnl -= tx.amount * price;
                if let Some(token_id) = &tx.token_id {
                    self.open_positions.insert(
                        token_id.clone(),
                        PositionEntry {
                            price,
                            amount: tx.amount,
                            timestamp: tx.timestamp,
                        },
                    );
                }
                self.push_event(TradeKind::Buy, tx.timestamp);
            }
            TradeKind::Sell => {
                self.realize(tx.amount * price, tx.timestamp);
            }
            TradeKind::Transfer => {
                let closed = tx
                    .token_id
                    .as_ref()
                    .and_then(|token_id| self.open_positions.remove(token_id));
                if closed.is_some() {
                    self.realize(tx.amount * price, tx.timestamp);
                }
            }
            TradeKind::Other => {}
        }
        self.total_trades += 1;
    }

    fn realize(&mut self, proceeds: f64, timestamp: i64) {
        self.realized_pnl += proceeds;
        if proceeds > 0.0 {
            self.profitable_trades += 1;
        }
        self.push_event(TradeKind::Sell, timestamp);
    }

    fn push_event(&mut self, kind: TradeKind, timestamp: i64) {
        self.buy_sell_dates.push(TradeEvent {
            transaction: kind,
            datetime: format_block_time(timestamp),
        });
    }

    pub fn total_pnl(&self) -> f64 {
        self.realized_pnl + self.unrealized_pnl
    }

    /// Win rate percentage, 0 when nothing was counted
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            (self.profitable_trades as f64 / self.total_trades as f64) * 100.0
        }
    }

    pub fn open_position_count(&self) -> usize {
        self.open_positions.len()
    }
}

/// Average holding period in minutes
///
/// Pairs recorded events positionally (1st with 2nd, 3rd with 4th, ...)
/// and averages close-minus-open; an unpaired trailing event is ignored.
/// Pairing is positional, not asset-matched.
pub fn average_holding_period_minutes(events: &[TradeEvent]) -> f64 {
    let mut periods = Vec::new();

    for pair in events.chunks(2) {
        if pair.len() < 2 {
            break;
        }
        let (Some(opened), Some(closed)) = (
            parse_event_time(&pair[0].datetime),
            parse_event_time(&pair[1].datetime),
        ) else {
            continue;
        };
        periods.push(closed.signed_duration_since(opened).num_seconds() as f64 / 60.0);
    }

    if periods.is_empty() {
        0.0
    } else {
        periods.iter().sum::<f64>() / periods.len() as f64
    }
}

fn parse_event_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT).ok()
}
