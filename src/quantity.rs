pub mod cost;
pub mod energy;
pub mod power;
pub mod rate;

use std::ops::Mul;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places monetary values are rounded to: hundredths of an øre.
pub const MONETARY_PRECISION: u32 = 4;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<T, const POWER: isize, const TIME: isize, const COST: isize>(pub T);

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Quantity<T, POWER, TIME, COST>
where
    Self: PartialOrd,
{
    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<f64, POWER, TIME, COST> {
    pub const ZERO: Self = Self(0.0);
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<Decimal, POWER, TIME, COST> {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Round to [`MONETARY_PRECISION`], midpoints away from zero.
    #[must_use]
    pub fn round_to_precision(self) -> Self {
        Self(self.0.round_dp_with_strategy(MONETARY_PRECISION, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Round to [`MONETARY_PRECISION`], dropping the remaining digits.
    #[must_use]
    pub fn truncate_to_precision(self) -> Self {
        Self(self.0.round_dp_with_strategy(MONETARY_PRECISION, RoundingStrategy::ToZero))
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Mul<Decimal>
    for Quantity<Decimal, POWER, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    pub type Bare<T> = Quantity<T, 0, 0, 0>;

    #[test]
    fn test_max() {
        assert_eq!(Bare::from(1).max(Bare::from(2)), Bare::from(2));
        assert_eq!(Bare::from(2).max(Bare::from(1)), Bare::from(2));
    }

    #[test]
    fn test_round_to_precision_midpoint_away_from_zero() {
        assert_eq!(Bare::from(dec!(0.03375)).round_to_precision(), Bare::from(dec!(0.0338)));
        assert_eq!(Bare::from(dec!(-0.03375)).round_to_precision(), Bare::from(dec!(-0.0338)));
        assert_eq!(Bare::from(dec!(0.089125)).round_to_precision(), Bare::from(dec!(0.0891)));
    }

    #[test]
    fn test_truncate_to_precision() {
        assert_eq!(Bare::from(dec!(0.00045)).truncate_to_precision(), Bare::from(dec!(0.0004)));
        assert_eq!(Bare::from(dec!(0.000054)).truncate_to_precision(), Bare::from(dec!(0)));
    }
}
