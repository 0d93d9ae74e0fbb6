//! Address validation helpers.
//!
//! Configuration addresses are parsed once at startup and stored in their
//! canonical form (lowercase hex with 0x prefix) so that every later
//! comparison is a plain string comparison.

use alloy::primitives::Address;
use anyhow::Context;
use std::str::FromStr;

use super::ZERO_ADDRESS;

/// Parse an address and return its canonical lowercase form.
pub fn normalize_address(address: &str) -> anyhow::Result<String> {
    let parsed = Address::from_str(address.trim())
        .with_context(|| format!("invalid address {:?}", address))?;

    Ok(format!("{parsed:#x}"))
}

/// Map a factory lookup result to an optional pair id.
///
/// Factories answer "no pair" with the zero address.
pub fn normalize_pair_address(address: &str) -> Option<String> {
    let lower = address.to_lowercase();
    if lower == ZERO_ADDRESS {
        None
    } else {
        Some(lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address_lowercases() {
        let normalized = normalize_address("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap();
        assert_eq!(normalized, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    }

    #[test]
    fn test_normalize_address_rejects_garbage() {
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address("usdc").is_err());
    }

    #[test]
    fn test_zero_sentinel_means_no_pair() {
        assert_eq!(normalize_pair_address(ZERO_ADDRESS), None);
        assert_eq!(
            normalize_pair_address("0x1116B80FD0Ff9A980DCfBFa3ed477BFA6bBD6a85"),
            Some("0x1116b80fd0ff9a980dcfbfa3ed477bfa6bbd6a85".to_string())
        );
    }
}
