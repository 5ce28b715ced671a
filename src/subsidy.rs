//! Electricity price subsidy («strømstøtte»).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::rate::KilowattHourRate};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubsidyRules {
    /// Spot price above which the subsidy kicks in, VAT included.
    pub threshold: KilowattHourRate,

    /// Covered share of the spot price above the threshold, `0..1`.
    pub coverage_rate: Decimal,
}

impl Default for SubsidyRules {
    /// 2025 rules: 75 øre excluding VAT, 90 % coverage.
    fn default() -> Self {
        Self { threshold: KilowattHourRate::from(dec!(0.9375)), coverage_rate: dec!(0.9) }
    }
}

impl SubsidyRules {
    pub fn validate(&self) -> Result {
        ensure!(self.threshold.is_positive(), "subsidy threshold must be positive: {}", self.threshold);
        ensure!(
            (Decimal::ZERO..Decimal::ONE).contains(&self.coverage_rate),
            "subsidy coverage rate must be within [0, 1): {}",
            self.coverage_rate,
        );
        Ok(())
    }

    /// Subsidy per kWh for the spot price, zero at or below the threshold.
    ///
    /// Always strictly below the excess over the threshold: when rounding would reach it,
    /// the subsidy is truncated instead.
    #[must_use]
    pub fn subsidy(&self, spot_price: KilowattHourRate) -> KilowattHourRate {
        if spot_price <= self.threshold {
            return KilowattHourRate::ZERO;
        }
        let excess = spot_price - self.threshold;
        let covered = excess * self.coverage_rate;
        let rounded = covered.round_to_precision();
        if rounded < excess { rounded } else { covered.truncate_to_precision() }
    }

    /// Spot price after the subsidy.
    #[must_use]
    pub fn effective_price(&self, spot_price: KilowattHourRate) -> KilowattHourRate {
        spot_price - self.subsidy(spot_price)
    }
}
