//! Numeraire and token pricing.
//!
//! - [`oracle`] - USD price of the numeraire from designated stablecoin pairs
//! - [`token_price`] - token price in numeraire units through whitelisted pairs
//! - [`attribution`] - whitelist-filtered volume and liquidity
//! - [`price_resolver`] - one pricing cycle tying the three together

pub mod attribution;
pub mod oracle;
pub mod price_resolver;
pub mod token_price;

#[cfg(test)]
pub(crate) mod fixtures;

pub use attribution::{tracked_liquidity_usd, tracked_volume_usd, Tracking};
pub use oracle::{
    derive_numeraire_price_usd, load_stablecoin_pairs, StablecoinPairs, StablecoinQuote,
};
pub use price_resolver::{PriceResolver, SwapUpdate, SyncUpdate};
pub use token_price::{derive_token_price, resolve_token_price, TokenPrice};
