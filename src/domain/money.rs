//! Currency amounts.
//!
//! The data source prices players in integer tenths of a currency unit
//! (`55` means `5.5m`). Optimizers work in tenths; [`Money`] is the
//! presentation and user-input form.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency amount with one decimal digit of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Build from an amount in tenths.
    #[must_use]
    pub fn from_tenths(tenths: i64) -> Self {
        Self(Decimal::new(tenths, 1))
    }

    /// Convert back to tenths.
    ///
    /// Returns `None` when the amount has more precision than one decimal
    /// digit or does not fit.
    #[must_use]
    pub fn to_tenths(self) -> Option<i64> {
        let scaled = self.0 * Decimal::TEN;
        if scaled.fract() != Decimal::ZERO {
            return None;
        }
        scaled.to_i64()
    }

    /// The underlying decimal value.
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim().trim_end_matches('m')).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tenths_round_trip() {
        let money = Money::from_tenths(55);
        assert_eq!(money.amount(), dec!(5.5));
        assert_eq!(money.to_tenths(), Some(55));
    }

    #[test]
    fn rejects_sub_tenth_precision() {
        let money: Money = "1.25".parse().unwrap();
        assert_eq!(money.to_tenths(), None);
    }

    #[test]
    fn parses_with_suffix() {
        let money: Money = "2.5m".parse().unwrap();
        assert_eq!(money.to_tenths(), Some(25));
    }

    #[test]
    fn displays_with_one_decimal() {
        assert_eq!(Money::from_tenths(1000).to_string(), "100.0m");
        assert_eq!(Money::from_tenths(-15).to_string(), "-1.5m");
    }
}
