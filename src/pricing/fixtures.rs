//! Shared test data: a KCC-like chain with WKCS as numeraire and three
//! designated stablecoin pairs.
//!
//! | pair | token0 | token1 | reserves     | WKCS price |
//! |------|--------|--------|--------------|------------|
//! | usdt | USDT   | WKCS   | 1000 / 100   | 10         |
//! | usdc | WKCS   | USDC   | 300 / 3600   | 12         |
//! | busd | BUSD   | WKCS   | 1100 / 100   | 11         |

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::{
    config::{PricingConfig, StablecoinPairConfig, StablecoinPairsConfig, Whitelist},
    models::{Pair, PairSide, Token},
    repository::InMemoryStore,
};

pub const NUMERAIRE: &str = "0x4446fc4eb47f2f6586f9faab68b3498f86c07521";
pub const USDT: &str = "0x0039f574ee5cc39bdd162e9a88e3eb1f111baf48";
pub const USDC: &str = "0x980a5afef3d17ad98635f6c5aebcbaeded3c3430";
pub const BUSD: &str = "0xe3f5a90f9cb311505cd691a46596599aa1a0ad7d";

pub const USDT_PAIR: &str = "0x1116b80fd0ff9a980dcfbfa3ed477bfa6bbd6a85";
pub const USDC_PAIR: &str = "0xc2cacd273630bc1dcb1c7ca398374896fa1d6322";
pub const BUSD_PAIR: &str = "0x26d94a2e3bd703847c3be3c30ead42b926b427c2";

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

pub fn config(whitelist: &[&str]) -> PricingConfig {
    PricingConfig::new(
        NUMERAIRE,
        StablecoinPairsConfig {
            usdt: Some(StablecoinPairConfig::new(USDT_PAIR, PairSide::Token1)),
            usdc: Some(StablecoinPairConfig::new(USDC_PAIR, PairSide::Token0)),
            busd: Some(StablecoinPairConfig::new(BUSD_PAIR, PairSide::Token1)),
        },
        Whitelist::new(whitelist),
        dec("2"),
    )
}

pub fn stablecoin_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert_token(Token::new(NUMERAIRE, "WKCS", 18).with_derived_numeraire(dec("1")));
    store.insert_token(Token::new(USDT, "USDT", 18));
    store.insert_token(Token::new(USDC, "USDC", 18));
    store.insert_token(Token::new(BUSD, "BUSD", 18));

    store.insert_pair(Pair::new(USDT_PAIR, USDT, NUMERAIRE).with_reserves(dec("1000"), dec("100")));
    store.insert_pair(Pair::new(USDC_PAIR, NUMERAIRE, USDC).with_reserves(dec("300"), dec("3600")));
    store.insert_pair(Pair::new(BUSD_PAIR, BUSD, NUMERAIRE).with_reserves(dec("1100"), dec("100")));
    store
}
