//! Tracked volume and liquidity.
//!
//! Only whitelisted tokens are trusted to carry a USD value. A trade or
//! deposit between two unknown tokens contributes nothing to aggregate
//! statistics, no matter what their derived prices claim.

use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    config::Whitelist,
    models::Token,
    utils::TWO,
};

/// Which sides of a two token operation are whitelisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    Both,
    Token0,
    Token1,
    Neither,
}

impl Tracking {
    pub fn classify(token0: &str, token1: &str, whitelist: &Whitelist) -> Self {
        match (whitelist.contains(token0), whitelist.contains(token1)) {
            (true, true) => Tracking::Both,
            (true, false) => Tracking::Token0,
            (false, true) => Tracking::Token1,
            (false, false) => Tracking::Neither,
        }
    }
}

/// USD value of each side: amount × derived price × numeraire price.
fn usd_values(
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    numeraire_price_usd: &BigDecimal,
) -> (BigDecimal, BigDecimal) {
    let price0 = &token0.derived_numeraire * numeraire_price_usd;
    let price1 = &token1.derived_numeraire * numeraire_price_usd;

    (amount0 * price0, amount1 * price1)
}

/// Tracked USD volume of a swap.
///
/// - Both whitelisted: average of both sides
/// - One whitelisted: that side's value
/// - Neither: zero
pub fn tracked_volume_usd(
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    whitelist: &Whitelist,
    numeraire_price_usd: &BigDecimal,
) -> BigDecimal {
    let tracking = Tracking::classify(&token0.id, &token1.id, whitelist);
    if tracking == Tracking::Neither {
        return BigDecimal::zero();
    }

    let (value0, value1) = usd_values(amount0, token0, amount1, token1, numeraire_price_usd);
    match tracking {
        Tracking::Both => (value0 + value1) / &*TWO,
        Tracking::Token0 => value0,
        Tracking::Token1 => value1,
        Tracking::Neither => BigDecimal::zero(),
    }
}

/// Tracked USD liquidity of a deposit or pool.
///
/// - Both whitelisted: sum of both sides
/// - One whitelisted: twice that side's value (pool assumed balanced)
/// - Neither: zero
pub fn tracked_liquidity_usd(
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    whitelist: &Whitelist,
    numeraire_price_usd: &BigDecimal,
) -> BigDecimal {
    let tracking = Tracking::classify(&token0.id, &token1.id, whitelist);
    if tracking == Tracking::Neither {
        return BigDecimal::zero();
    }

    let (value0, value1) = usd_values(amount0, token0, amount1, token1, numeraire_price_usd);
    match tracking {
        Tracking::Both => value0 + value1,
        Tracking::Token0 => value0 * &*TWO,
        Tracking::Token1 => value1 * &*TWO,
        Tracking::Neither => BigDecimal::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::fixtures::*;

    const SCAM: &str = "0x00000000000000000000000000000000000000f1";
    const MEME: &str = "0x00000000000000000000000000000000000000f2";

    fn token(id: &str, derived: &str) -> Token {
        Token::new(id, "T", 18).with_derived_numeraire(dec(derived))
    }

    fn whitelist() -> Whitelist {
        Whitelist::new([NUMERAIRE, USDT, USDC])
    }

    #[test]
    fn test_classify() {
        let whitelist = whitelist();
        assert_eq!(Tracking::classify(USDT, USDC, &whitelist), Tracking::Both);
        assert_eq!(Tracking::classify(USDT, SCAM, &whitelist), Tracking::Token0);
        assert_eq!(Tracking::classify(SCAM, USDT, &whitelist), Tracking::Token1);
        assert_eq!(Tracking::classify(SCAM, MEME, &whitelist), Tracking::Neither);
    }

    #[test]
    fn test_one_whitelisted_side_scenario() {
        let token0 = token(USDT, "2");
        let token1 = token(SCAM, "1000");

        let volume = tracked_volume_usd(
            &dec("10"),
            &token0,
            &dec("100"),
            &token1,
            &whitelist(),
            &dec("1.5"),
        );
        let liquidity = tracked_liquidity_usd(
            &dec("10"),
            &token0,
            &dec("100"),
            &token1,
            &whitelist(),
            &dec("1.5"),
        );

        assert_eq!(volume, dec("30"));
        assert_eq!(liquidity, dec("60"));
    }

    #[test]
    fn test_token1_whitelisted_uses_token1_side() {
        let token0 = token(SCAM, "1000");
        let token1 = token(USDC, "0.5");

        let volume =
            tracked_volume_usd(&dec("1"), &token0, &dec("8"), &token1, &whitelist(), &dec("2"));
        let liquidity =
            tracked_liquidity_usd(&dec("1"), &token0, &dec("8"), &token1, &whitelist(), &dec("2"));

        assert_eq!(volume, dec("8"));
        assert_eq!(liquidity, dec("16"));
    }

    #[test]
    fn test_both_whitelisted_volume_is_symmetric_average() {
        let token0 = token(USDT, "0.4");
        let token1 = token(USDC, "0.4");

        let volume =
            tracked_volume_usd(&dec("25"), &token0, &dec("25"), &token1, &whitelist(), &dec("3"));

        // a × price × p
        assert_eq!(volume, dec("30"));
    }

    #[test]
    fn test_both_whitelisted_averages_stale_prices() {
        let token0 = token(USDT, "1");
        let token1 = token(USDC, "1");

        let volume =
            tracked_volume_usd(&dec("10"), &token0, &dec("12"), &token1, &whitelist(), &dec("1"));
        let liquidity =
            tracked_liquidity_usd(&dec("10"), &token0, &dec("12"), &token1, &whitelist(), &dec("1"));

        assert_eq!(volume, dec("11"));
        assert_eq!(liquidity, dec("22"));
    }

    #[test]
    fn test_liquidity_doubles_single_trusted_side() {
        let token0 = token(NUMERAIRE, "1");
        let token1 = token(MEME, "7");

        let liquidity =
            tracked_liquidity_usd(&dec("4"), &token0, &dec("9"), &token1, &whitelist(), &dec("2.5"));

        // 2 × a × p × u
        assert_eq!(liquidity, dec("20"));
    }

    #[test]
    fn test_neither_whitelisted_is_untracked() {
        let token0 = token(SCAM, "5");
        let token1 = token(MEME, "5");

        assert!(
            tracked_volume_usd(&dec("10"), &token0, &dec("10"), &token1, &whitelist(), &dec("3"))
                .is_zero()
        );
        assert!(
            tracked_liquidity_usd(&dec("10"), &token0, &dec("10"), &token1, &whitelist(), &dec("3"))
                .is_zero()
        );
    }

    #[test]
    fn test_attribution_is_idempotent() {
        let token0 = token(USDT, "0.3");
        let token1 = token(USDC, "0.7");

        let first =
            tracked_volume_usd(&dec("3"), &token0, &dec("7"), &token1, &whitelist(), &dec("1.1"));
        let second =
            tracked_volume_usd(&dec("3"), &token0, &dec("7"), &token1, &whitelist(), &dec("1.1"));
        assert_eq!(first.to_string(), second.to_string());
    }
}
