use std::{fs::File, io::BufReader, io::Read, path::Path};

use alloy::primitives::{Address, U256};
use anyhow::{anyhow, Context};
use bigdecimal::BigDecimal;
use log::debug;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::{PairAddressResolver, PairRepository, TokenRepository};
use crate::{
    abis::v2,
    models::{Bundle, Pair, Token},
    pricing::{SwapUpdate, SyncUpdate},
    utils::{convert_token_to_decimal, normalize_pair_address, parse_raw_amount},
};

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotToken {
    pub id: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Pair with raw on-chain reserves (integer strings).
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotPair {
    pub id: String,
    pub token0: String,
    pub token1: String,
    pub reserve0: String,
    pub reserve1: String,
}

/// Swap with raw on-chain amounts (integer strings).
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSwap {
    pub pair: String,
    #[serde(default = "zero_amount")]
    pub amount0_in: String,
    #[serde(default = "zero_amount")]
    pub amount1_in: String,
    #[serde(default = "zero_amount")]
    pub amount0_out: String,
    #[serde(default = "zero_amount")]
    pub amount1_out: String,
}

fn zero_amount() -> String {
    "0".to_string()
}

impl SnapshotSwap {
    pub fn to_event(&self) -> anyhow::Result<v2::Swap> {
        Ok(v2::Swap {
            sender: Address::ZERO,
            amount0In: parse_raw_amount(&self.amount0_in)?,
            amount1In: parse_raw_amount(&self.amount1_in)?,
            amount0Out: parse_raw_amount(&self.amount0_out)?,
            amount1Out: parse_raw_amount(&self.amount1_out)?,
            to: Address::ZERO,
        })
    }
}

/// Point-in-time dataset of tokens, pairs and swaps to replay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    pub tokens: Vec<SnapshotToken>,
    pub pairs: Vec<SnapshotPair>,
    #[serde(default)]
    pub swaps: Vec<SnapshotSwap>,
}

impl Snapshot {
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse snapshot JSON")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?;

        Self::from_reader(BufReader::new(file))
    }
}

/// Sorted, lowercase key so that both token orders hit the same entry.
fn pair_key(token_a: &str, token_b: &str) -> (String, String) {
    let a = token_a.to_lowercase();
    let b = token_b.to_lowercase();
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// In-memory entity store.
///
/// Implements every collaborator the pricing core reads from, and applies the
/// updates the core computes. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tokens: FxHashMap<String, Token>,
    pairs: FxHashMap<String, Pair>,
    /// Pair created for two tokens, like the factory's getPair mapping
    pair_index: FxHashMap<(String, String), String>,
    token_order: Vec<String>,
    pair_order: Vec<String>,
    bundle: Bundle,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, syncing every pair's raw reserves.
    pub fn from_snapshot(snapshot: &Snapshot) -> anyhow::Result<Self> {
        let mut store = Self::new();

        for token in &snapshot.tokens {
            store.insert_token(Token::new(&token.id, &token.symbol, token.decimals));
        }

        for pair in &snapshot.pairs {
            store.insert_pair(Pair::new(&pair.id, &pair.token0, &pair.token1));

            let event = v2::Sync {
                reserve0: parse_raw_amount::<112, 2>(&pair.reserve0)
                    .with_context(|| format!("pair {} reserve0", pair.id))?,
                reserve1: parse_raw_amount::<112, 2>(&pair.reserve1)
                    .with_context(|| format!("pair {} reserve1", pair.id))?,
            };
            store.handle_sync(&pair.id, &event)?;
        }

        debug!(
            "Loaded snapshot with {} tokens and {} pairs",
            store.token_order.len(),
            store.pair_order.len()
        );

        Ok(store)
    }

    pub fn insert_token(&mut self, token: Token) {
        if !self.tokens.contains_key(&token.id) {
            self.token_order.push(token.id.clone());
        }
        self.tokens.insert(token.id.clone(), token);
    }

    pub fn remove_token(&mut self, id: &str) -> Option<Token> {
        let id = id.to_lowercase();
        self.token_order.retain(|t| *t != id);
        self.tokens.remove(&id)
    }

    pub fn insert_pair(&mut self, pair: Pair) {
        if !self.pairs.contains_key(&pair.id) {
            self.pair_order.push(pair.id.clone());
        }
        self.pair_index
            .insert(pair_key(&pair.token0, &pair.token1), pair.id.clone());
        self.pairs.insert(pair.id.clone(), pair);
    }

    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.get(&id.to_lowercase())
    }

    pub fn pair(&self, id: &str) -> Option<&Pair> {
        self.pairs.get(&id.to_lowercase())
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.token_order.iter().filter_map(|id| self.tokens.get(id))
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pair_order.iter().filter_map(|id| self.pairs.get(id))
    }

    pub fn pair_ids(&self) -> Vec<String> {
        self.pair_order.clone()
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Mutate a stored pair in place. Returns false if the pair is unknown.
    pub fn update_pair<F: FnOnce(&mut Pair)>(&mut self, id: &str, f: F) -> bool {
        match self.pairs.get_mut(&id.to_lowercase()) {
            Some(pair) => {
                f(pair);
                true
            },
            None => false,
        }
    }

    fn decimals_of(&self, pair: &Pair) -> anyhow::Result<(u8, u8)> {
        let token0 = self
            .tokens
            .get(&pair.token0)
            .ok_or_else(|| anyhow!("token {} of pair {} is not indexed", pair.token0, pair.id))?;
        let token1 = self
            .tokens
            .get(&pair.token1)
            .ok_or_else(|| anyhow!("token {} of pair {} is not indexed", pair.token1, pair.id))?;

        Ok((token0.decimals, token1.decimals))
    }

    /// Store the reserves of a `Sync` event, decimal adjusted.
    pub fn handle_sync(&mut self, pair_id: &str, event: &v2::Sync) -> anyhow::Result<()> {
        let id = pair_id.to_lowercase();
        let pair = self
            .pairs
            .get(&id)
            .ok_or_else(|| anyhow!("pair {} is not indexed", pair_id))?;
        let (decimals0, decimals1) = self.decimals_of(pair)?;

        let reserve0 = convert_token_to_decimal(event.reserve0, decimals0);
        let reserve1 = convert_token_to_decimal(event.reserve1, decimals1);

        if let Some(pair) = self.pairs.get_mut(&id) {
            pair.set_reserves(reserve0, reserve1);
        }
        Ok(())
    }

    /// Total decimal-adjusted amounts (in + out) moved by a `Swap` event.
    pub fn swap_amounts(
        &self,
        pair_id: &str,
        event: &v2::Swap,
    ) -> anyhow::Result<(BigDecimal, BigDecimal)> {
        let pair = self
            .pair(pair_id)
            .ok_or_else(|| anyhow!("pair {} is not indexed", pair_id))?;
        let (decimals0, decimals1) = self.decimals_of(pair)?;

        let total0: U256 = event.amount0In.saturating_add(event.amount0Out);
        let total1: U256 = event.amount1In.saturating_add(event.amount1Out);

        Ok((
            convert_token_to_decimal(total0, decimals0),
            convert_token_to_decimal(total1, decimals1),
        ))
    }

    /// Persist the values computed for a synced pair.
    pub fn apply_sync(&mut self, update: &SyncUpdate) -> bool {
        let Some(pair) = self.pairs.get_mut(&update.pair_id) else {
            return false;
        };
        pair.reserve_numeraire = update.reserve_numeraire.clone();
        pair.tracked_reserve_numeraire = update.tracked_reserve_numeraire.clone();
        pair.reserve_usd = update.reserve_usd.clone();

        for (id, derived) in [
            (&update.token0_id, &update.token0_derived_numeraire),
            (&update.token1_id, &update.token1_derived_numeraire),
        ] {
            if let Some(token) = self.tokens.get_mut(id) {
                token.derived_numeraire = derived.clone();
            }
        }

        self.bundle.update(update.numeraire_price_usd.clone());
        true
    }

    /// Accumulate a priced swap into the pair's lifetime stats.
    pub fn apply_swap(&mut self, update: &SwapUpdate) -> bool {
        let Some(pair) = self.pairs.get_mut(&update.pair_id) else {
            return false;
        };
        pair.volume_usd += &update.tracked_volume_usd;
        pair.untracked_volume_usd += &update.derived_amount_usd;
        pair.tx_count += 1;
        true
    }
}

impl PairRepository for InMemoryStore {
    fn load_pair(&self, id: &str) -> Option<Pair> {
        self.pair(id).cloned()
    }
}

impl TokenRepository for InMemoryStore {
    fn load_token(&self, id: &str) -> Option<Token> {
        self.token(id).cloned()
    }
}

impl PairAddressResolver for InMemoryStore {
    fn resolve_pair_address(&self, token_a: &str, token_b: &str) -> Option<String> {
        self.pair_index
            .get(&pair_key(token_a, token_b))
            .and_then(|id| normalize_pair_address(id))
    }
}
