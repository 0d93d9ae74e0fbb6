use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::Serialize;

/// Token metadata and current derived price.
///
/// `derived_numeraire` is the token's price in numeraire units. It defaults to
/// zero and is written back by the caller after each price resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub id: String,
    pub symbol: String,
    pub decimals: u8,
    pub derived_numeraire: BigDecimal,
}

impl Token {
    pub fn new(id: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            id: id.to_lowercase(),
            symbol: symbol.to_string(),
            decimals,
            derived_numeraire: BigDecimal::zero(),
        }
    }

    pub fn with_derived_numeraire(mut self, derived_numeraire: BigDecimal) -> Self {
        self.derived_numeraire = derived_numeraire;
        self
    }
}
