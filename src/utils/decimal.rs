//! Decimal helpers shared by the pricing code.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use once_cell::sync::Lazy;

pub static ONE: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(1));

pub static TWO: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(2));

/// Divide, returning None instead of panicking on a zero divisor.
#[inline]
pub fn checked_div(numerator: &BigDecimal, denominator: &BigDecimal) -> Option<BigDecimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}
