use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::models::PairSide;

/// A designated numeraire/stablecoin pair.
///
/// `numeraire_side` is deployment specific and fixed by configuration: it
/// names the side of the pair that holds the numeraire token.
#[derive(Debug, Deserialize, Clone)]
pub struct StablecoinPairSettings {
    pub address: String,
    pub numeraire_side: PairSide,
}

/// The designated stablecoin pairs. Any of them may be missing, either
/// because the chain has no such pair or because it is not created yet.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StablecoinSettings {
    #[serde(default)]
    pub usdt: Option<StablecoinPairSettings>,
    #[serde(default)]
    pub usdc: Option<StablecoinPairSettings>,
    #[serde(default)]
    pub busd: Option<StablecoinPairSettings>,
}

/// Price derivation parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Wrapped native token used as the numeraire
    pub numeraire: String,
    #[serde(default)]
    pub stablecoin_pairs: StablecoinSettings,
    /// Trusted tokens, in priority order
    pub whitelist: Vec<String>,
    /// Minimum pair reserve (in numeraire units) required to trust a price
    #[serde(default = "default_minimum_liquidity_threshold")]
    pub minimum_liquidity_threshold: String,
}

fn default_minimum_liquidity_threshold() -> String {
    "2".to_string()
}

/// Pair factory used to compute pair addresses offline.
#[derive(Debug, Deserialize, Clone)]
pub struct FactorySettings {
    pub address: String,
    pub init_code_hash: String,
}

/// Snapshot replay options for the binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySettings {
    pub snapshot_path: String,
    /// Number of times every pair sync is replayed. Prices propagate one
    /// whitelist hop per pass.
    #[serde(default = "default_passes")]
    pub passes: usize,
}

fn default_passes() -> usize {
    2
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
    #[serde(default)]
    pub factory: Option<FactorySettings>,
    #[serde(default)]
    pub replay: Option<ReplaySettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config")
    }

    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(name))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_yaml_with_defaults() {
        let settings = Settings::from_yaml_str(
            r#"
pricing:
  numeraire: "0x4446Fc4eb47f2f6586f9fAAb68B3498F86C07521"
  stablecoin_pairs:
    usdt:
      address: "0x1116b80FD0Ff9A980DCfBFa3ed477BFA6bBD6a85"
      numeraire_side: token1
  whitelist:
    - "0x4446Fc4eb47f2f6586f9fAAb68B3498F86C07521"
"#,
        )
        .unwrap();

        assert_eq!(settings.pricing.minimum_liquidity_threshold, "2");
        assert_eq!(settings.pricing.whitelist.len(), 1);
        let usdt = settings.pricing.stablecoin_pairs.usdt.unwrap();
        assert_eq!(usdt.numeraire_side, PairSide::Token1);
        assert!(settings.pricing.stablecoin_pairs.usdc.is_none());
        assert!(settings.factory.is_none());
        assert!(settings.replay.is_none());
    }

    #[test]
    fn test_settings_reject_unknown_side() {
        let result = Settings::from_yaml_str(
            r#"
pricing:
  numeraire: "0x4446Fc4eb47f2f6586f9fAAb68B3498F86C07521"
  stablecoin_pairs:
    usdc:
      address: "0xc2CACD273630bc1dcb1C7Ca398374896Fa1D6322"
      numeraire_side: left
  whitelist: []
"#,
        );
        assert!(result.is_err());
    }
}
