//! Type conversion utilities.
//!
//! Raw on-chain integers (U112 reserves, U256 amounts) are converted to
//! decimal-adjusted `BigDecimal` values without going through floats.

use alloy::primitives::Uint;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use std::str::FromStr;

// ============================================
// Raw Amount Conversions
// ============================================

/// Convert a raw token amount to a decimal-adjusted `BigDecimal`.
///
/// The conversion is exact: the raw integer becomes the unscaled value and
/// `decimals` becomes the scale.
///
/// # Example
/// ```ignore
/// let raw = U256::from(1_500_000_000_000_000_000u128); // 1.5e18
/// let adjusted = convert_token_to_decimal(raw, 18); // 1.5
/// ```
pub fn convert_token_to_decimal<const BITS: usize, const LIMBS: usize>(
    amount: Uint<BITS, LIMBS>,
    decimals: u8,
) -> BigDecimal {
    let bytes = amount.to_le_bytes_vec();
    let big_int = BigInt::from_bytes_le(Sign::Plus, &bytes);

    BigDecimal::new(big_int, decimals as i64)
}

/// Parse a raw integer amount (decimal or 0x-prefixed hex string).
pub fn parse_raw_amount<const BITS: usize, const LIMBS: usize>(
    value: &str,
) -> anyhow::Result<Uint<BITS, LIMBS>> {
    Uint::from_str(value.trim())
        .map_err(|e| anyhow::anyhow!("invalid raw amount {:?}: {}", value, e))
}
