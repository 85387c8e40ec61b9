/// CSV and JSON import/export
///
/// Wallet addresses come in as the first CSV column with no header row
/// assumed; admitted verdicts go out sorted by total PNL descending with
/// the run settings serialized into the last column.
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::analyzer::WalletVerdict;
use crate::logger::{self, LogTag};

/// Columns written by `export_wallet_analysis`, in order
pub const EXPORT_COLUMNS: [&str; 6] = [
    "address",
    "total_pnl",
    "realized_pnl",
    "unrealized_pnl",
    "win_rate",
    "settings",
];

/// Load wallet addresses from the first column of a CSV file
pub fn load_wallet_addresses(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut addresses = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Failed to parse CSV row {}: {}", idx + 1, e))?;
        if let Some(first) = record.get(0) {
            if !first.is_empty() {
                addresses.push(first.to_string());
            }
        }
    }

    logger::info(
        LogTag::Export,
        &format!(
            "Loaded {} wallet addresses from {}",
            addresses.len(),
            path.display()
        ),
    );
    Ok(addresses)
}

/// Export admitted verdicts to CSV, sorted by total PNL descending
pub fn export_wallet_analysis(verdicts: &[WalletVerdict], path: &Path) -> Result<(), String> {
    if verdicts.is_empty() {
        logger::warning(LogTag::Export, "No valid results to export");
        return Ok(());
    }

    let mut sorted: Vec<&WalletVerdict> = verdicts.iter().collect();
    sorted.sort_by(|a, b| {
        b.total_pnl
            .partial_cmp(&a.total_pnl)
            .unwrap_or(Ordering::Equal)
    });

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;

    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for verdict in &sorted {
        let settings = serde_json::to_string(&verdict.settings)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        let record = vec![
            verdict.address.clone(),
            verdict.total_pnl.to_string(),
            verdict.realized_pnl.to_string(),
            verdict.unrealized_pnl.to_string(),
            verdict.win_rate.to_string(),
            settings,
        ];
        writer
            .write_record(&record)
            .map_err(|e| format!("Failed to write CSV row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush '{}': {}", path.display(), e))?;

    logger::info(
        LogTag::Export,
        &format!(
            "Results successfully exported: {} wallets to {}",
            sorted.len(),
            path.display()
        ),
    );
    Ok(())
}

/// Export any serializable value to a JSON file
pub fn export_to_json<T: Serialize>(value: &T, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize data: {}", e))?;
    fs::write(path, json).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

    logger::info(
        LogTag::Export,
        &format!("Data successfully exported to {}", path.display()),
    );
    Ok(())
}
