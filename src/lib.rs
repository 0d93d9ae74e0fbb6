pub mod abis;
pub mod config;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod utils;

pub use config::{FactoryConfig, PricingConfig, Settings, Whitelist};
pub use models::{Bundle, Pair, PairSide, Token};
pub use pricing::{PriceResolver, SwapUpdate, SyncUpdate, TokenPrice};
pub use repository::{
    Create2PairResolver, InMemoryStore, PairAddressResolver, PairRepository, Snapshot,
    TokenRepository,
};
