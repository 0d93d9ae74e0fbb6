use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::Zero;

use crate::{
    config::{PricingConfig, StablecoinPairConfig},
    models::{Pair, PairSide},
    repository::PairRepository,
    utils::{checked_div, ONE},
};

/// Numeraire liquidity and USD price implied by one stablecoin pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StablecoinQuote {
    /// Numeraire units held by the pair (the weight)
    pub numeraire_reserve: BigDecimal,
    /// Stablecoin units per numeraire unit
    pub price_usd: BigDecimal,
}

impl StablecoinQuote {
    /// Returns None for an empty pool: a pair without numeraire liquidity
    /// carries no price and counts as not created yet.
    pub fn new(numeraire_reserve: BigDecimal, price_usd: BigDecimal) -> Option<Self> {
        if numeraire_reserve.is_zero() {
            return None;
        }

        Some(Self {
            numeraire_reserve,
            price_usd,
        })
    }

    /// Read the quote from a pair given the side that holds the numeraire.
    ///
    /// - numeraire is token0: price = token1_price (stablecoin per numeraire)
    /// - numeraire is token1: price = token0_price
    pub fn from_pair(pair: &Pair, numeraire_side: PairSide) -> Option<Self> {
        Self::new(
            pair.reserve(numeraire_side).clone(),
            pair.price_in_counterpart(numeraire_side).clone(),
        )
    }
}

/// Quotes of the designated stablecoin pairs that currently exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StablecoinPairs {
    pub usdt: Option<StablecoinQuote>,
    pub usdc: Option<StablecoinQuote>,
    pub busd: Option<StablecoinQuote>,
}

/// Derive the USD price of one numeraire unit.
///
/// Fallback chain:
/// 1. usdt, usdc and busd exist → liquidity weighted average of all three
/// 2. usdc and usdt exist → liquidity weighted average of those two
/// 3. usdt exists → usdt price
/// 4. usdc exists → usdc price
/// 5. nothing exists → 1, so derived prices do not collapse to zero before
///    the first stablecoin pair is created
pub fn derive_numeraire_price_usd(pairs: &StablecoinPairs) -> BigDecimal {
    if let (Some(usdt), Some(usdc), Some(busd)) = (&pairs.usdt, &pairs.usdc, &pairs.busd) {
        if let Some(price) = weighted_price(&[busd, usdc, usdt]) {
            return price;
        }
    }

    if let (Some(usdt), Some(usdc)) = (&pairs.usdt, &pairs.usdc) {
        if let Some(price) = weighted_price(&[usdc, usdt]) {
            return price;
        }
    }

    if let Some(usdt) = &pairs.usdt {
        return usdt.price_usd.clone();
    }

    if let Some(usdc) = &pairs.usdc {
        return usdc.price_usd.clone();
    }

    ONE.clone()
}

/// Σ (reserve_i / total) × price_i, or None if there is no liquidity at all.
fn weighted_price(quotes: &[&StablecoinQuote]) -> Option<BigDecimal> {
    let total = quotes
        .iter()
        .fold(BigDecimal::zero(), |acc, q| acc + &q.numeraire_reserve);

    let mut price = BigDecimal::zero();
    for quote in quotes {
        let weight = checked_div(&quote.numeraire_reserve, &total)?;
        price += &quote.price_usd * weight;
    }

    Some(price)
}

/// Load the designated stablecoin pairs from the repository.
///
/// A pair whose configured numeraire side does not hold the numeraire is a
/// configuration error; it is reported and ignored.
pub fn load_stablecoin_pairs<R: PairRepository>(config: &PricingConfig, repo: &R) -> StablecoinPairs {
    let pairs = &config.stablecoin_pairs;

    StablecoinPairs {
        usdt: load_quote("usdt", pairs.usdt.as_ref(), &config.numeraire, repo),
        usdc: load_quote("usdc", pairs.usdc.as_ref(), &config.numeraire, repo),
        busd: load_quote("busd", pairs.busd.as_ref(), &config.numeraire, repo),
    }
}

fn load_quote<R: PairRepository>(
    name: &str,
    pair_config: Option<&StablecoinPairConfig>,
    numeraire: &str,
    repo: &R,
) -> Option<StablecoinQuote> {
    let pair_config = pair_config?;
    let pair = repo.load_pair(&pair_config.pair)?;

    let side = pair_config.numeraire_side;
    if pair.token(side) != numeraire {
        warn!(
            "Stablecoin pair {} ({}) has {} on {:?}, expected numeraire {}; ignoring it",
            name,
            pair.id,
            pair.token(side),
            side,
            numeraire
        );
        return None;
    }

    let quote = StablecoinQuote::from_pair(&pair, side);
    if quote.is_none() {
        debug!("Stablecoin pair {} ({}) has no numeraire liquidity yet", name, pair.id);
    }
    quote
}
