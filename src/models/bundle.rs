use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::One;
use serde::Serialize;

/// Current USD price of one numeraire unit.
///
/// Recomputed once per pricing cycle by the oracle and stored by the caller.
/// Readers never consult this record implicitly: the price is handed to the
/// pricing functions as an explicit argument.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    pub numeraire_price_usd: BigDecimal,
    pub updated_at: DateTime<Utc>,
}

impl Bundle {
    /// Bundle before any stablecoin pair is indexed.
    pub fn new() -> Self {
        Self {
            numeraire_price_usd: BigDecimal::one(),
            updated_at: Utc::now(),
        }
    }

    /// Store a freshly derived price.
    ///
    /// Returns true if the stored price changed.
    pub fn update(&mut self, numeraire_price_usd: BigDecimal) -> bool {
        let changed = self.numeraire_price_usd != numeraire_price_usd;
        self.numeraire_price_usd = numeraire_price_usd;
        self.updated_at = Utc::now();
        changed
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}
