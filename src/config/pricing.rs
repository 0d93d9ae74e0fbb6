use std::str::FromStr;

use alloy::primitives::{Address, B256};
use anyhow::{bail, Context};
use bigdecimal::BigDecimal;
use log::warn;
use num_traits::Zero;

use super::{FactorySettings, PricingSettings, StablecoinPairSettings, Whitelist};
use crate::{models::PairSide, utils::normalize_address};

/// Validated designated stablecoin pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StablecoinPairConfig {
    pub pair: String,
    pub numeraire_side: PairSide,
}

impl StablecoinPairConfig {
    pub fn new(pair: &str, numeraire_side: PairSide) -> Self {
        Self {
            pair: pair.to_lowercase(),
            numeraire_side,
        }
    }

    fn from_settings(name: &str, settings: &StablecoinPairSettings) -> anyhow::Result<Self> {
        let pair = normalize_address(&settings.address)
            .with_context(|| format!("stablecoin pair {name}"))?;

        Ok(Self {
            pair,
            numeraire_side: settings.numeraire_side,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StablecoinPairsConfig {
    pub usdt: Option<StablecoinPairConfig>,
    pub usdc: Option<StablecoinPairConfig>,
    pub busd: Option<StablecoinPairConfig>,
}

impl StablecoinPairsConfig {
    fn configured(&self) -> impl Iterator<Item = (&'static str, &StablecoinPairConfig)> {
        [("usdt", &self.usdt), ("usdc", &self.usdc), ("busd", &self.busd)]
            .into_iter()
            .filter_map(|(name, pair)| pair.as_ref().map(|pair| (name, pair)))
    }
}

/// Immutable pricing configuration, validated at startup.
///
/// All ids are canonical lowercase addresses.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub numeraire: String,
    pub stablecoin_pairs: StablecoinPairsConfig,
    pub whitelist: Whitelist,
    pub minimum_liquidity_threshold: BigDecimal,
}

impl PricingConfig {
    pub fn new(
        numeraire: &str,
        stablecoin_pairs: StablecoinPairsConfig,
        whitelist: Whitelist,
        minimum_liquidity_threshold: BigDecimal,
    ) -> Self {
        Self {
            numeraire: numeraire.to_lowercase(),
            stablecoin_pairs,
            whitelist,
            minimum_liquidity_threshold,
        }
    }

    pub fn is_numeraire(&self, token: &str) -> bool {
        self.numeraire == token
    }

    /// Validate raw settings.
    ///
    /// Rejects malformed addresses, a negative threshold and a stablecoin pair
    /// designated twice. Duplicated whitelist entries are dropped with a
    /// warning.
    pub fn from_settings(settings: &PricingSettings) -> anyhow::Result<Self> {
        let numeraire = normalize_address(&settings.numeraire).context("numeraire")?;

        let stablecoin_pairs = StablecoinPairsConfig {
            usdt: settings
                .stablecoin_pairs
                .usdt
                .as_ref()
                .map(|s| StablecoinPairConfig::from_settings("usdt", s))
                .transpose()?,
            usdc: settings
                .stablecoin_pairs
                .usdc
                .as_ref()
                .map(|s| StablecoinPairConfig::from_settings("usdc", s))
                .transpose()?,
            busd: settings
                .stablecoin_pairs
                .busd
                .as_ref()
                .map(|s| StablecoinPairConfig::from_settings("busd", s))
                .transpose()?,
        };

        let configured: Vec<_> = stablecoin_pairs.configured().collect();
        for (i, (name, pair)) in configured.iter().enumerate() {
            if let Some((other, _)) = configured[..i].iter().find(|(_, p)| p.pair == pair.pair) {
                bail!("stablecoin pairs {other} and {name} share address {}", pair.pair);
            }
        }
        if configured.is_empty() {
            warn!("No stablecoin pairs configured, numeraire price stays at 1");
        }

        let mut tokens = Vec::with_capacity(settings.whitelist.len());
        for token in &settings.whitelist {
            tokens.push(normalize_address(token).context("whitelist")?);
        }
        let whitelist = Whitelist::new(&tokens);
        if whitelist.len() != tokens.len() {
            warn!(
                "Whitelist contains {} duplicated entries, keeping first occurrences",
                tokens.len() - whitelist.len()
            );
        }
        if !whitelist.contains(&numeraire) {
            warn!("Numeraire {} is not whitelisted", numeraire);
        }

        let minimum_liquidity_threshold =
            BigDecimal::from_str(settings.minimum_liquidity_threshold.trim()).with_context(|| {
                format!(
                    "invalid minimum_liquidity_threshold {:?}",
                    settings.minimum_liquidity_threshold
                )
            })?;
        if minimum_liquidity_threshold < BigDecimal::zero() {
            bail!("minimum_liquidity_threshold must not be negative");
        }

        Ok(Self {
            numeraire,
            stablecoin_pairs,
            whitelist,
            minimum_liquidity_threshold,
        })
    }
}

/// Validated pair factory parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryConfig {
    pub address: Address,
    pub init_code_hash: B256,
}

impl FactoryConfig {
    pub fn from_settings(settings: &FactorySettings) -> anyhow::Result<Self> {
        let address = Address::from_str(settings.address.trim())
            .with_context(|| format!("invalid factory address {:?}", settings.address))?;
        let init_code_hash = B256::from_str(settings.init_code_hash.trim()).with_context(|| {
            format!("invalid factory init code hash {:?}", settings.init_code_hash)
        })?;

        Ok(Self {
            address,
            init_code_hash,
        })
    }
}
