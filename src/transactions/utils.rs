/// Shared formatting helpers for log output

/// Shorten a wallet address for log lines
pub fn format_address_short(address: &str) -> String {
    if address.len() <= 12 {
        address.to_string()
    } else {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    }
}

/// Shorten a transaction signature for log lines
pub fn format_signature_short(signature: &str) -> String {
    if signature.len() <= 16 {
        signature.to_string()
    } else {
        format!("{}...{}", &signature[..8], &signature[signature.len() - 4..])
    }
}
