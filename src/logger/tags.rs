use crate::arguments;

/// Log tags identify the module a message originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Rpc,
    Fetch,
    Price,
    Analyzer,
    Batch,
    Export,
}

impl LogTag {
    /// Fixed-width display label
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Rpc => "RPC",
            LogTag::Fetch => "FETCH",
            LogTag::Price => "PRICE",
            LogTag::Analyzer => "ANALYZER",
            LogTag::Batch => "BATCH",
            LogTag::Export => "EXPORT",
        }
    }

    /// Whether debug-level messages for this tag are enabled via CLI flags
    pub fn debug_enabled(&self) -> bool {
        if arguments::is_verbose_enabled() {
            return true;
        }
        match self {
            LogTag::System => true,
            LogTag::Rpc => arguments::is_debug_rpc_enabled(),
            LogTag::Fetch => arguments::is_debug_fetcher_enabled(),
            LogTag::Price => arguments::is_debug_pricing_enabled(),
            LogTag::Analyzer => arguments::is_debug_analyzer_enabled(),
            LogTag::Batch => arguments::is_debug_analyzer_enabled(),
            LogTag::Export => arguments::is_debug_export_enabled(),
        }
    }
}
