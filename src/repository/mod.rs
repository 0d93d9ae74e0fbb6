//! Read-only collaborators the pricing core consumes.
//!
//! All lookups return point-in-time snapshots. A missing entity is a normal
//! state during early indexing and is represented by `None`.

use crate::models::{Pair, Token};

mod create2;
mod memory;

pub use create2::Create2PairResolver;
pub use memory::{InMemoryStore, Snapshot, SnapshotPair, SnapshotSwap, SnapshotToken};

/// Pair lookup by canonical id.
pub trait PairRepository {
    fn load_pair(&self, id: &str) -> Option<Pair>;
}

/// Token lookup by canonical id.
pub trait TokenRepository {
    fn load_token(&self, id: &str) -> Option<Token>;
}

/// Factory lookup of the pair created for two tokens.
///
/// Returns `None` when no pair exists (the factory's zero address).
pub trait PairAddressResolver {
    fn resolve_pair_address(&self, token_a: &str, token_b: &str) -> Option<String>;
}

impl<T: PairRepository + ?Sized> PairRepository for &T {
    fn load_pair(&self, id: &str) -> Option<Pair> {
        (**self).load_pair(id)
    }
}

impl<T: TokenRepository + ?Sized> TokenRepository for &T {
    fn load_token(&self, id: &str) -> Option<Token> {
        (**self).load_token(id)
    }
}

impl<T: PairAddressResolver + ?Sized> PairAddressResolver for &T {
    fn resolve_pair_address(&self, token_a: &str, token_b: &str) -> Option<String> {
        (**self).resolve_pair_address(token_a, token_b)
    }
}
