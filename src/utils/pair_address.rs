//! Uniswap V2 style pair address computation.
//!
//! Pair contracts are deployed with CREATE2, so a pair's address is a pure
//! function of the factory, the factory's init code hash and the two tokens.

use alloy::primitives::{keccak256, Address, B256};
use alloy::sol_types::SolValue;

/// Sort two tokens the way the factory does: lower address is token0.
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Compute the CREATE2 address of the pair for two tokens.
///
/// ```text
/// salt = keccak256(abi.encodePacked(token0, token1))
/// pair = address(keccak256(0xff ++ factory ++ salt ++ init_code_hash)[12:])
/// ```
///
/// Returns the address as a lowercase hex string with 0x prefix.
pub fn compute_pair_address(
    factory: Address,
    init_code_hash: B256,
    token_a: Address,
    token_b: Address,
) -> String {
    let (token0, token1) = sort_tokens(token_a, token_b);

    let salt = keccak256((token0, token1).abi_encode_packed());
    let pair = factory.create2(salt.0, init_code_hash.0);

    format!("{pair:#x}")
}
