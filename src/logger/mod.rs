//! Structured logging for the wallet screener
//!
//! Tagged, leveled, colored console output:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Per-module debug control via --debug-<module> flags
//! - --verbose enables every debug tag at once
//!
//! ## Usage
//!
//! ```rust
//! use walletscreener::logger::{self, LogTag};
//!
//! logger::error(LogTag::Rpc, "Connection failed");
//! logger::warning(LogTag::Rpc, "Rate limit approaching");
//! logger::info(LogTag::Analyzer, "Wallet admitted");
//! logger::debug(LogTag::Fetch, "Raw page: ..."); // Only with --debug-fetcher
//! ```

mod core;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup before any logging occurs; prints which debug
/// modes are active so log readers know what to expect.
pub fn init() {
    crate::arguments::print_debug_info();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues that don't stop the batch)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, shown only when the tag's --debug-<module> flag is set
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}
