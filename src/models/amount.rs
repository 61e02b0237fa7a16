//! This file defines the `Amount` type, a monetary value fixed at two
//! fractional digits.
//!
//! Amounts are kept as exact decimals rather than floats so that sums over
//! arbitrarily many entries stay exact to the cent.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A non-negative monetary value with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value.
    ///
    /// The value is normalized to a scale of two, so `1.5` becomes `1.50`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidAmount] if `value` is
    /// negative or carries more than two significant fractional digits.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value < Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "amount cannot be negative, got {value}"
            )));
        }

        let normalized = value.normalize();

        if normalized.scale() > 2 {
            return Err(Error::InvalidAmount(format!(
                "amount cannot have more than 2 decimal places, got {value}"
            )));
        }

        let mut value = normalized;
        value.rescale(2);

        Ok(Self(value))
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is non-negative. The value is
    /// still rescaled to two fractional digits.
    pub fn new_unchecked(mut value: Decimal) -> Self {
        value.rescale(2);
        Self(value)
    }

    /// The zero amount, `0.00`.
    pub fn zero() -> Self {
        Self(Decimal::new(0, 2))
    }

    /// The underlying decimal value, always at scale two.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        // Adding two scale-2 decimals keeps scale 2.
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s)
            .map_err(|error| Error::InvalidAmount(format!("could not parse \"{s}\": {error}")))?;

        Amount::new(value)
    }
}

#[cfg(test)]
mod amount_tests {
    use rust_decimal::Decimal;

    use crate::Error;

    use super::Amount;

    #[test]
    fn new_fails_on_negative_value() {
        let result = Amount::new(Decimal::new(-1050, 2));

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn new_fails_on_three_decimal_places() {
        let result = Amount::new(Decimal::new(1005, 3));

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn new_accepts_trailing_zeros_beyond_two_places() {
        let amount = Amount::new("1.250".parse().unwrap()).unwrap();

        assert_eq!(amount.to_string(), "1.25");
    }

    #[test]
    fn new_rescales_to_two_decimal_places() {
        let amount = Amount::new(Decimal::new(15, 1)).unwrap();

        assert_eq!(amount.to_string(), "1.50");
    }

    #[test]
    fn zero_formats_with_two_decimal_places() {
        assert_eq!(Amount::zero().to_string(), "0.00");
    }

    #[test]
    fn sum_of_many_cents_is_exact() {
        let ten_cents = Amount::new(Decimal::new(10, 2)).unwrap();

        let total: Amount = std::iter::repeat_n(ten_cents, 1000).sum();

        assert_eq!(total.to_string(), "100.00");
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: Amount = std::iter::empty().sum();

        assert_eq!(total, Amount::zero());
    }

    #[test]
    fn serializes_as_decimal_string() {
        let amount = Amount::new(Decimal::new(150000, 2)).unwrap();

        let json = serde_json::to_string(&amount).unwrap();

        assert_eq!(json, "\"1500.00\"");
    }
}
