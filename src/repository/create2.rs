use std::str::FromStr;

use alloy::primitives::Address;
use log::debug;

use super::{PairAddressResolver, PairRepository};
use crate::{config::FactoryConfig, utils::compute_pair_address};

/// Resolves pair addresses offline with CREATE2 instead of querying the
/// factory contract.
///
/// CREATE2 gives the address a pair would have whether or not it was ever
/// deployed, so an address only counts as resolved when the repository has
/// indexed a pair under it.
pub struct Create2PairResolver<R> {
    factory: FactoryConfig,
    pairs: R,
}

impl<R: PairRepository> Create2PairResolver<R> {
    pub fn new(factory: FactoryConfig, pairs: R) -> Self {
        Self { factory, pairs }
    }
}

impl<R: PairRepository> PairAddressResolver for Create2PairResolver<R> {
    fn resolve_pair_address(&self, token_a: &str, token_b: &str) -> Option<String> {
        let (Ok(a), Ok(b)) = (Address::from_str(token_a), Address::from_str(token_b)) else {
            debug!("Cannot resolve pair for non-address tokens {token_a}/{token_b}");
            return None;
        };

        let pair =
            compute_pair_address(self.factory.address, self.factory.init_code_hash, a, b);

        self.pairs.load_pair(&pair).map(|_| pair)
    }
}
