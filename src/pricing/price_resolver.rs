use bigdecimal::BigDecimal;
use log::debug;
use num_traits::Zero;
use serde::Serialize;

use super::{
    attribution, derive_numeraire_price_usd, load_stablecoin_pairs, token_price, TokenPrice,
};
use crate::{
    config::PricingConfig,
    models::{Pair, Token},
    repository::{PairAddressResolver, PairRepository, TokenRepository},
    utils::{checked_div, TWO},
};

/// Values derived for a pair after its reserves changed.
///
/// The caller persists these; the resolver never writes to the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncUpdate {
    pub pair_id: String,
    pub numeraire_price_usd: BigDecimal,
    pub token0_id: String,
    pub token0_derived_numeraire: BigDecimal,
    pub token1_id: String,
    pub token1_derived_numeraire: BigDecimal,
    pub reserve_numeraire: BigDecimal,
    pub tracked_reserve_numeraire: BigDecimal,
    pub reserve_usd: BigDecimal,
}

/// Values derived for a swap on a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapUpdate {
    pub pair_id: String,
    /// Whitelist-filtered volume
    pub tracked_volume_usd: BigDecimal,
    pub tracked_volume_numeraire: BigDecimal,
    /// Volume at derived prices, whitelisted or not
    pub derived_amount_numeraire: BigDecimal,
    pub derived_amount_usd: BigDecimal,
}

/// Price resolution for one evaluation cycle.
///
/// Holds the numeraire price derived for the cycle and hands it explicitly to
/// every computation, so all prices produced by one resolver agree on the
/// same numeraire price:
/// 1. Numeraire → 1
/// 2. Other tokens → first liquid pair with a whitelisted token (1 hop)
/// 3. Volume/liquidity → counted only through whitelisted sides
///
/// Create a new resolver after each batch of reserve changes; the repository
/// is borrowed immutably for the resolver's lifetime.
pub struct PriceResolver<'a, R, F> {
    config: &'a PricingConfig,
    repo: &'a R,
    pair_resolver: &'a F,
    numeraire_price_usd: BigDecimal,
}

impl<'a, R, F> PriceResolver<'a, R, F>
where
    R: PairRepository + TokenRepository,
    F: PairAddressResolver,
{
    pub fn new(
        config: &'a PricingConfig,
        repo: &'a R,
        pair_resolver: &'a F,
        numeraire_price_usd: BigDecimal,
    ) -> Self {
        Self {
            config,
            repo,
            pair_resolver,
            numeraire_price_usd,
        }
    }

    /// Run the oracle against the current stablecoin pairs and build a
    /// resolver around its result.
    pub fn for_cycle(config: &'a PricingConfig, repo: &'a R, pair_resolver: &'a F) -> Self {
        let stablecoin_pairs = load_stablecoin_pairs(config, repo);
        let numeraire_price_usd = derive_numeraire_price_usd(&stablecoin_pairs);
        debug!("Numeraire price for cycle: {} USD", numeraire_price_usd);

        Self::new(config, repo, pair_resolver, numeraire_price_usd)
    }

    pub fn numeraire_price_usd(&self) -> &BigDecimal {
        &self.numeraire_price_usd
    }

    pub fn resolve_token_price(&self, token: &Token) -> TokenPrice {
        token_price::resolve_token_price(
            token,
            &self.config.numeraire,
            &self.config.whitelist,
            &self.config.minimum_liquidity_threshold,
            self.repo,
            self.pair_resolver,
        )
    }

    /// Price in numeraire units, zero when no whitelisted route exists.
    pub fn derive_token_price(&self, token: &Token) -> BigDecimal {
        self.resolve_token_price(token).unwrap_or_zero()
    }

    pub fn tracked_volume_usd(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        attribution::tracked_volume_usd(
            amount0,
            token0,
            amount1,
            token1,
            &self.config.whitelist,
            &self.numeraire_price_usd,
        )
    }

    pub fn tracked_liquidity_usd(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        attribution::tracked_liquidity_usd(
            amount0,
            token0,
            amount1,
            token1,
            &self.config.whitelist,
            &self.numeraire_price_usd,
        )
    }

    fn to_numeraire(&self, usd: &BigDecimal) -> BigDecimal {
        checked_div(usd, &self.numeraire_price_usd).unwrap_or_else(BigDecimal::zero)
    }

    fn load_pair_tokens(&self, pair_id: &str) -> Option<(Pair, Token, Token)> {
        let Some(pair) = self.repo.load_pair(pair_id) else {
            debug!("Pair {} is not indexed", pair_id);
            return None;
        };
        let (Some(token0), Some(token1)) =
            (self.repo.load_token(&pair.token0), self.repo.load_token(&pair.token1))
        else {
            debug!("Tokens of pair {} are not indexed", pair_id);
            return None;
        };

        Some((pair, token0, token1))
    }

    /// Derive the new state of a pair whose reserves were just synced.
    ///
    /// Both tokens are re-priced first, and the new prices feed the pair's
    /// valuation:
    /// - reserve_numeraire = reserve0 × derived0 + reserve1 × derived1
    /// - reserve_usd = reserve_numeraire × numeraire price
    /// - tracked_reserve_numeraire = tracked liquidity of the reserves, in
    ///   numeraire units
    pub fn price_sync(&self, pair_id: &str) -> Option<SyncUpdate> {
        let (pair, token0, token1) = self.load_pair_tokens(pair_id)?;

        let derived0 = self.derive_token_price(&token0);
        let derived1 = self.derive_token_price(&token1);
        let token0 = token0.with_derived_numeraire(derived0.clone());
        let token1 = token1.with_derived_numeraire(derived1.clone());

        let tracked_liquidity_usd =
            self.tracked_liquidity_usd(&pair.reserve0, &token0, &pair.reserve1, &token1);
        let tracked_reserve_numeraire = self.to_numeraire(&tracked_liquidity_usd);

        let reserve_numeraire = &pair.reserve0 * &derived0 + &pair.reserve1 * &derived1;
        let reserve_usd = &reserve_numeraire * &self.numeraire_price_usd;

        Some(SyncUpdate {
            pair_id: pair.id,
            numeraire_price_usd: self.numeraire_price_usd.clone(),
            token0_id: token0.id,
            token0_derived_numeraire: derived0,
            token1_id: token1.id,
            token1_derived_numeraire: derived1,
            reserve_numeraire,
            tracked_reserve_numeraire,
            reserve_usd,
        })
    }

    /// Value a swap moving `amount0` and `amount1` (in + out) through a pair.
    ///
    /// Uses the tokens' stored derived prices.
    pub fn price_swap(
        &self,
        pair_id: &str,
        amount0: &BigDecimal,
        amount1: &BigDecimal,
    ) -> Option<SwapUpdate> {
        let (pair, token0, token1) = self.load_pair_tokens(pair_id)?;

        let derived_amount_numeraire = (&token1.derived_numeraire * amount1
            + &token0.derived_numeraire * amount0)
            / &*TWO;
        let derived_amount_usd = &derived_amount_numeraire * &self.numeraire_price_usd;

        let tracked_volume_usd = self.tracked_volume_usd(amount0, &token0, amount1, &token1);
        let tracked_volume_numeraire = self.to_numeraire(&tracked_volume_usd);

        Some(SwapUpdate {
            pair_id: pair.id,
            tracked_volume_usd,
            tracked_volume_numeraire,
            derived_amount_numeraire,
            derived_amount_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::fixtures::*;

    const MEME: &str = "0x00000000000000000000000000000000000000f2";
    const MEME_PAIR: &str = "0x00000000000000000000000000000000000000e5";

    #[test]
    fn test_for_cycle_runs_oracle() {
        let store = stablecoin_store();
        let config = config(&[NUMERAIRE, USDT, USDC, BUSD]);

        let resolver = PriceResolver::for_cycle(&config, &store, &store);
        assert_eq!(resolver.numeraire_price_usd(), &dec("11.4"));

        let empty = crate::repository::InMemoryStore::new();
        let resolver = PriceResolver::for_cycle(&config, &empty, &empty);
        assert_eq!(resolver.numeraire_price_usd(), &dec("1"));
    }

    #[test]
    fn test_price_sync_values_pair_with_new_prices() {
        let mut store = stablecoin_store();
        // USDT pair must clear the liquidity gate for USDT to be priced
        store.update_pair(USDT_PAIR, |pair| pair.reserve_numeraire = dec("200"));
        let config = config(&[NUMERAIRE, USDT, USDC, BUSD]);

        let resolver = PriceResolver::new(&config, &store, &store, dec("11"));
        let update = resolver.price_sync(USDT_PAIR).unwrap();

        // USDT is token0 of 1000 USDT / 100 WKCS → 0.1 WKCS per USDT
        assert_eq!(update.token0_id, USDT);
        assert_eq!(update.token0_derived_numeraire, dec("0.1"));
        assert_eq!(update.token1_id, NUMERAIRE);
        assert_eq!(update.token1_derived_numeraire, dec("1"));

        // 1000 × 0.1 + 100 × 1
        assert_eq!(update.reserve_numeraire, dec("200"));
        assert_eq!(update.reserve_usd, dec("2200"));
        // Both whitelisted: tracked = full reserve value
        assert_eq!(update.tracked_reserve_numeraire, dec("200"));
        assert_eq!(update.numeraire_price_usd, dec("11"));
    }

    #[test]
    fn test_price_sync_doubles_single_whitelisted_side() {
        let mut store = stablecoin_store();
        store.insert_token(Token::new(MEME, "MEME", 18));
        // 50 WKCS / 5000 MEME, below the liquidity gate so MEME stays unpriced
        store.insert_pair(Pair::new(MEME_PAIR, NUMERAIRE, MEME).with_reserves(dec("50"), dec("5000")));
        let config = config(&[NUMERAIRE, USDT, USDC]);

        let resolver = PriceResolver::new(&config, &store, &store, dec("2"));
        let update = resolver.price_sync(MEME_PAIR).unwrap();

        assert_eq!(update.token0_derived_numeraire, dec("1"));
        assert!(update.token1_derived_numeraire.is_zero());
        assert_eq!(update.reserve_numeraire, dec("50"));
        assert_eq!(update.reserve_usd, dec("100"));
        assert_eq!(update.tracked_reserve_numeraire, dec("100"));
    }

    #[test]
    fn test_price_sync_unknown_pair() {
        let store = stablecoin_store();
        let config = config(&[NUMERAIRE]);

        let resolver = PriceResolver::new(&config, &store, &store, dec("2"));
        assert!(resolver.price_sync(MEME_PAIR).is_none());
    }

    #[test]
    fn test_price_swap_tracks_whitelisted_side_only() {
        let mut store = stablecoin_store();
        store.insert_token(Token::new(MEME, "MEME", 18).with_derived_numeraire(dec("0.02")));
        store.insert_pair(Pair::new(MEME_PAIR, NUMERAIRE, MEME).with_reserves(dec("50"), dec("5000")));
        let config = config(&[NUMERAIRE, USDT, USDC]);

        let resolver = PriceResolver::new(&config, &store, &store, dec("1.5"));
        let update = resolver.price_swap(MEME_PAIR, &dec("10"), &dec("400")).unwrap();

        // Untracked: (400 × 0.02 + 10 × 1) / 2 = 9 WKCS
        assert_eq!(update.derived_amount_numeraire, dec("9"));
        assert_eq!(update.derived_amount_usd, dec("13.5"));
        // Tracked: WKCS side only
        assert_eq!(update.tracked_volume_usd, dec("15"));
        assert_eq!(update.tracked_volume_numeraire, dec("10"));
    }

    #[test]
    fn test_zero_numeraire_price_tracks_nothing_in_numeraire() {
        let store = stablecoin_store();
        let config = config(&[NUMERAIRE, USDT, USDC]);

        let resolver = PriceResolver::new(&config, &store, &store, BigDecimal::zero());
        let update = resolver.price_swap(USDC_PAIR, &dec("1"), &dec("12")).unwrap();

        assert!(update.tracked_volume_usd.is_zero());
        assert!(update.tracked_volume_numeraire.is_zero());
    }
}
