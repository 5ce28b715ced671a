use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::quantity::{Quantity, cost::Cost};

/// Norwegian krone per kilowatt-hour.
pub type KilowattHourRate = Quantity<Decimal, -1, -1, 1>;

impl KilowattHourRate {
    /// Spread a monthly fee over every hour of the month, as a per-kWh equivalent.
    #[must_use]
    pub fn amortized(monthly_fee: Cost, days_in_month: u32) -> Self {
        if days_in_month == 0 {
            return Self::ZERO;
        }
        Self(monthly_fee.0 / Decimal::from(days_in_month * 24))
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} kr/kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_amortized() {
        for (fee, days, expected) in [
            (dec!(400), 30, 0.556),
            (dec!(400), 31, 0.538),
            (dec!(400), 28, 0.595),
            (dec!(155), 30, 0.215),
            (dec!(415), 30, 0.576),
            (dec!(770), 30, 1.069),
        ] {
            let rate = KilowattHourRate::amortized(Cost::from(fee), days);
            assert_abs_diff_eq!(rate.0.to_f64().unwrap(), expected, epsilon = 0.001);
        }
    }

    #[test]
    fn test_amortized_empty_month() {
        assert_eq!(KilowattHourRate::amortized(Cost::from(dec!(400)), 0), KilowattHourRate::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHourRate::from(dec!(0.4613)).to_string(), "0.4613 kr/kWh");
    }
}
