//! Utility functions for pairprice.
//!
//! - [`conversion`] - Raw on-chain integer to decimal conversion
//! - [`decimal`] - Decimal constants and guarded division
//! - [`pair_address`] - CREATE2 pair address computation
//! - [`validation`] - Address parsing and canonicalization

mod conversion;
mod decimal;
mod pair_address;
mod validation;

// ============================================
// Common Constants
// ============================================

/// The Ethereum zero address (0x0000000000000000000000000000000000000000)
/// Returned by factories when no pair exists for two tokens.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

pub use conversion::{convert_token_to_decimal, parse_raw_amount};

pub use decimal::{checked_div, ONE, TWO};

pub use pair_address::{compute_pair_address, sort_tokens};

pub use validation::{normalize_address, normalize_pair_address};
