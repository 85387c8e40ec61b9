/// Transaction classification
///
/// The shipped strategy keys on marker-field presence in the raw record.
/// These predicates stand in for real program-instruction decoding; a
/// program-aware replacement only has to implement `ClassificationStrategy`.
use super::types::{ClassifiedTransaction, TradeKind, TransactionDetail};

/// Marker fields checked by the placeholder strategy
pub const BUY_MARKER: &str = "buy_condition";
pub const SELL_MARKER: &str = "sell_condition";
pub const TRANSFER_MARKER: &str = "transfer_condition";

/// Decides the trade kind for one transaction detail
pub trait ClassificationStrategy: Send + Sync {
    fn kind_of(&self, detail: &TransactionDetail) -> TradeKind;
}

/// Placeholder strategy: buy/sell/transfer keyed on marker presence,
/// buy taking precedence, transfer only when neither buy nor sell is set
pub struct MarkerClassifier;

impl ClassificationStrategy for MarkerClassifier {
    fn kind_of(&self, detail: &TransactionDetail) -> TradeKind {
        if detail.has_marker(BUY_MARKER) {
            TradeKind::Buy
        } else if detail.has_marker(SELL_MARKER) {
            TradeKind::Sell
        } else if detail.has_marker(TRANSFER_MARKER) {
            TradeKind::Transfer
        } else {
            TradeKind::Other
        }
    }
}

pub struct TransactionClassifier {
    strategy: Box<dyn ClassificationStrategy>,
}

impl Default for TransactionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionClassifier {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(MarkerClassifier))
    }

    pub fn with_strategy(strategy: Box<dyn ClassificationStrategy>) -> Self {
        Self { strategy }
    }

    /// Classify and normalize one detail record
    ///
    /// Never fails: unrecognized transactions come back as `Other` and the
    /// analyzer keeps them out of PNL accounting.
    pub fn classify(&self, detail: &TransactionDetail) -> ClassifiedTransaction {
        let kind = self.strategy.kind_of(detail);
        let amount = detail.amount_sol();
        let fees = detail.fee;

        ClassifiedTransaction {
            signature: detail.signature.clone(),
            kind,
            timestamp: detail.block_time,
            amount,
            fees,
            net_amount: amount - fees,
            token_id: detail.token_id.clone(),
        }
    }
}
