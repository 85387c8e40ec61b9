use chrono::Local;
use colored::*;
use std::io::{self, Write};

use super::levels::LogLevel;
use super::tags::LogTag;

/// Format and emit one log line
///
/// Debug messages are dropped unless the tag's debug flag is active.
pub(super) fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if level == LogLevel::Debug && !tag.debug_enabled() {
        return;
    }

    let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
    let label = format!("{:<8}", tag.as_str());

    let (symbol, label, message) = match level {
        LogLevel::Error => (
            level.symbol().red().bold(),
            label.red().bold(),
            message.red().to_string(),
        ),
        LogLevel::Warning => (
            level.symbol().yellow().bold(),
            label.yellow().bold(),
            message.yellow().to_string(),
        ),
        LogLevel::Info => (
            level.symbol().blue().bold(),
            label.blue().bold(),
            message.to_string(),
        ),
        LogLevel::Debug => (
            level.symbol().purple().bold(),
            label.purple().bold(),
            message.dimmed().to_string(),
        ),
    };

    println!(
        "{} {} {} {}",
        symbol,
        label,
        format!("[{}]", timestamp).dimmed(),
        message
    );
    let _ = io::stdout().flush();
}
