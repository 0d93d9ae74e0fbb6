use bigdecimal::BigDecimal;
use log::debug;
use num_traits::Zero;

use crate::{
    config::Whitelist,
    models::Token,
    repository::{PairAddressResolver, PairRepository, TokenRepository},
    utils::ONE,
};

/// Outcome of a token price search.
///
/// `Unknown` means no whitelisted pair qualified, which is different from a
/// price that is known to be zero.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPrice {
    Known(BigDecimal),
    Unknown,
}

impl TokenPrice {
    pub fn is_known(&self) -> bool {
        matches!(self, TokenPrice::Known(_))
    }

    /// Plain decimal form: unknown prices read as zero.
    pub fn unwrap_or_zero(self) -> BigDecimal {
        match self {
            TokenPrice::Known(price) => price,
            TokenPrice::Unknown => BigDecimal::zero(),
        }
    }
}

/// Find the price of `token` in numeraire units.
///
/// The numeraire itself is worth exactly one unit. Any other token is priced
/// through the first whitelisted token (in whitelist order) it has a pair
/// with whose numeraire reserve is strictly above `min_liquidity`:
///
/// ```text
/// price = (whitelisted token per token) × derived price of whitelisted token
/// ```
///
/// The search is a single hop and stops at the first qualifying pair, even
/// if a later whitelisted token has a deeper pool.
pub fn resolve_token_price<R, F>(
    token: &Token,
    numeraire: &str,
    whitelist: &Whitelist,
    min_liquidity: &BigDecimal,
    repo: &R,
    pair_resolver: &F,
) -> TokenPrice
where
    R: PairRepository + TokenRepository,
    F: PairAddressResolver,
{
    if token.id == numeraire {
        return TokenPrice::Known(ONE.clone());
    }

    for candidate in whitelist.iter() {
        if candidate == token.id {
            continue;
        }

        let Some(pair_address) = pair_resolver.resolve_pair_address(&token.id, candidate) else {
            continue;
        };

        let Some(pair) = repo.load_pair(&pair_address) else {
            debug!("Resolved pair {} for {} is not indexed", pair_address, token.id);
            continue;
        };

        if pair.reserve_numeraire <= *min_liquidity {
            continue;
        }

        let Some(side) = pair.side_of(&token.id) else {
            debug!("Resolved pair {} does not contain {}", pair.id, token.id);
            continue;
        };

        let counterpart_id = pair.token(side.other());
        let Some(counterpart) = repo.load_token(counterpart_id) else {
            debug!("Token {} of pair {} is not indexed", counterpart_id, pair.id);
            continue;
        };

        let price = pair.price_in_counterpart(side) * &counterpart.derived_numeraire;
        return TokenPrice::Known(price);
    }

    TokenPrice::Unknown
}

/// [`resolve_token_price`] in plain decimal form (zero when unknown).
pub fn derive_token_price<R, F>(
    token: &Token,
    numeraire: &str,
    whitelist: &Whitelist,
    min_liquidity: &BigDecimal,
    repo: &R,
    pair_resolver: &F,
) -> BigDecimal
where
    R: PairRepository + TokenRepository,
    F: PairAddressResolver,
{
    resolve_token_price(token, numeraire, whitelist, min_liquidity, repo, pair_resolver)
        .unwrap_or_zero()
}
