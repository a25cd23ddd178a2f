use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// A signed amount kept at full decimal precision.
///
/// Equality is exact and scale-independent (`100.0 == 100.00`), so split sums
/// are compared without any tolerance. Rounding only happens when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// Two fixed decimal places, midpoints rounded away from zero.
    pub fn to_fixed2(self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed2())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn equality_ignores_scale() {
        assert_eq!(m("100.0"), m("100.00"));
        assert_eq!(m("100"), Money::from_cents(10_000));
    }

    #[test]
    fn keeps_full_precision() {
        assert_ne!(m("0.333"), m("0.33"));
        assert_eq!(m("0.1") + m("0.2"), m("0.3"));
    }

    #[test]
    fn fixed2_pads_and_rounds() {
        assert_eq!(m("100").to_fixed2(), "100.00");
        assert_eq!(m("5.49").to_fixed2(), "5.49");
        assert_eq!(m("1.005").to_fixed2(), "1.01");
        assert_eq!(m("-136.04").to_fixed2(), "-136.04");
    }

    #[test]
    fn sum_of_splits() {
        let parts = [m("5.49"), m("129.55"), m("1.00")];
        assert_eq!(parts.iter().sum::<Money>(), m("136.04"));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn sign_helpers() {
        assert!(m("-0.01").is_negative());
        assert!(!m("0").is_negative());
        assert!(!m("-0").is_negative());
        assert_eq!(m("-12.50").abs(), m("12.5"));
        assert_eq!(-m("3"), m("-3"));
    }
}
