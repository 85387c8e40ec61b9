/// Global constants used across the wallet screener
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// SOLANA BLOCKCHAIN CONSTANTS
// ============================================================================

/// Number of decimal places for SOL
pub const SOL_DECIMALS: u8 = 9;

/// Lamports per SOL (10^9)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// SPL Token Program ID, used for getTokenAccountsByOwner queries
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

// ============================================================================
// JSON-RPC CONSTANTS
// ============================================================================

/// Fixed request id for every JSON-RPC envelope
pub const JSONRPC_REQUEST_ID: u64 = 1;

/// Server-reported application error for transactions with an unsupported
/// version. Treated as a permanent per-call skip, never retried.
pub const UNSUPPORTED_TX_VERSION_CODE: i64 = -32015;
