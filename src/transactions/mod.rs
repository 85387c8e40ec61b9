/// Transaction retrieval and classification
///
/// `fetcher` talks to the RPC seam, `classifier` turns raw details into
/// classified, amount-normalized records for the analyzer.
pub mod classifier;
pub mod fetcher;
pub mod types;
pub mod utils;

pub use classifier::{ClassificationStrategy, MarkerClassifier, TransactionClassifier};
pub use fetcher::TransactionFetcher;
pub use types::{ClassifiedTransaction, TradeKind, TransactionDetail};
