#[allow(clippy::module_inception)]
mod config;
mod pricing;
mod whitelist;

pub use config::{
    FactorySettings, PricingSettings, ReplaySettings, Settings, StablecoinPairSettings,
    StablecoinSettings,
};
pub use pricing::{FactoryConfig, PricingConfig, StablecoinPairConfig, StablecoinPairsConfig};
pub use whitelist::Whitelist;
