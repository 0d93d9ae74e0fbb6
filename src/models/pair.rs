use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::utils::checked_div;

/// One side of a liquidity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairSide {
    Token0,
    Token1,
}

impl PairSide {
    pub fn other(self) -> Self {
        match self {
            PairSide::Token0 => PairSide::Token1,
            PairSide::Token1 => PairSide::Token0,
        }
    }
}

/// Constant-product liquidity pair state.
///
/// Token order is the factory's order and is never normalized: `token0` and
/// `token1` are not interchangeable.
///
/// Price convention (Uniswap style):
/// - `token0_price` = token0 per token1 = reserve0 / reserve1
/// - `token1_price` = token1 per token0 = reserve1 / reserve0
///
/// A price whose divisor reserve is zero is stored as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pair {
    pub id: String,
    pub token0: String,
    pub token1: String,

    // Reserves (decimal adjusted)
    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,

    // Computed prices
    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,

    // Valuation, written back by the caller after each sync
    pub reserve_numeraire: BigDecimal,
    pub tracked_reserve_numeraire: BigDecimal,
    pub reserve_usd: BigDecimal,

    // Lifetime stats
    pub volume_usd: BigDecimal,
    pub untracked_volume_usd: BigDecimal,
    pub tx_count: u64,
}

impl Pair {
    pub fn new(id: &str, token0: &str, token1: &str) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            id: id.to_lowercase(),
            token0: token0.to_lowercase(),
            token1: token1.to_lowercase(),
            reserve0: BigDecimal::zero(),
            reserve1: BigDecimal::zero(),
            token0_price: BigDecimal::zero(),
            token1_price: BigDecimal::zero(),
            reserve_numeraire: BigDecimal::zero(),
            tracked_reserve_numeraire: BigDecimal::zero(),
            reserve_usd: BigDecimal::zero(),
            volume_usd: BigDecimal::zero(),
            untracked_volume_usd: BigDecimal::zero(),
            tx_count: 0,
        }
    }

    pub fn with_reserves(mut self, reserve0: BigDecimal, reserve1: BigDecimal) -> Self {
        self.set_reserves(reserve0, reserve1);
        self
    }

    pub fn with_reserve_numeraire(mut self, reserve_numeraire: BigDecimal) -> Self {
        self.reserve_numeraire = reserve_numeraire;
        self
    }

    /// Replace the reserves and recompute both prices.
    pub fn set_reserves(&mut self, reserve0: BigDecimal, reserve1: BigDecimal) {
        self.token0_price = checked_div(&reserve0, &reserve1).unwrap_or_else(BigDecimal::zero);
        self.token1_price = checked_div(&reserve1, &reserve0).unwrap_or_else(BigDecimal::zero);
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
    }

    /// Which side of the pair holds `token`, if any.
    pub fn side_of(&self, token: &str) -> Option<PairSide> {
        if self.token0 == token {
            Some(PairSide::Token0)
        } else if self.token1 == token {
            Some(PairSide::Token1)
        } else {
            None
        }
    }

    pub fn token(&self, side: PairSide) -> &str {
        match side {
            PairSide::Token0 => &self.token0,
            PairSide::Token1 => &self.token1,
        }
    }

    pub fn reserve(&self, side: PairSide) -> &BigDecimal {
        match side {
            PairSide::Token0 => &self.reserve0,
            PairSide::Token1 => &self.reserve1,
        }
    }

    /// Price of the token on `side`, denominated in the opposite token.
    ///
    /// token0 is quoted by `token1_price` (token1 per token0) and vice versa.
    pub fn price_in_counterpart(&self, side: PairSide) -> &BigDecimal {
        match side {
            PairSide::Token0 => &self.token1_price,
            PairSide::Token1 => &self.token0_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_set_reserves_computes_both_prices() {
        let pair = Pair::new("0xPAIR", "0xA", "0xB").with_reserves(dec("1000"), dec("50"));

        assert_eq!(pair.token0_price, dec("20"));
        assert_eq!(pair.token1_price, dec("0.05"));
        assert_eq!(pair.price_in_counterpart(PairSide::Token0), &dec("0.05"));
        assert_eq!(pair.price_in_counterpart(PairSide::Token1), &dec("20"));
    }

    #[test]
    fn test_zero_reserve_yields_zero_price() {
        let pair = Pair::new("0xpair", "0xa", "0xb").with_reserves(dec("1000"), BigDecimal::zero());

        assert!(pair.token0_price.is_zero());
        assert!(pair.token1_price.is_zero());
    }

    #[test]
    fn test_ids_are_lowercased_and_sides_resolve() {
        let pair = Pair::new("0xPAIR", "0xAA", "0xBB");

        assert_eq!(pair.id, "0xpair");
        assert_eq!(pair.side_of("0xaa"), Some(PairSide::Token0));
        assert_eq!(pair.side_of("0xbb"), Some(PairSide::Token1));
        assert_eq!(pair.side_of("0xcc"), None);
        assert_eq!(pair.token(PairSide::Token0.other()), "0xbb");
    }
}
