use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{
    capacity::{CapacityTier, CapacityTiers},
    energy_rate::EnergyRates,
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts, rate::KilowattHourRate},
};

/// Grid operators («nettselskap») with built-in default tariffs.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GridOperator {
    /// BKK (Bergen), 2026 prices.
    #[default]
    Bkk,

    /// Generic starting point for operators without a built-in table.
    Custom,
}

impl Display for GridOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bkk => write!(f, "BKK (Bergen)"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

impl GridOperator {
    #[must_use]
    pub fn energy_rates(self) -> EnergyRates {
        let (day, night) = match self {
            Self::Bkk => (dec!(0.4613), dec!(0.2329)),
            Self::Custom => (dec!(0.40), dec!(0.20)),
        };
        EnergyRates { day: KilowattHourRate::from(day), night: KilowattHourRate::from(night) }
    }

    /// Monthly capacity fees by upper bound in kilowatts.
    pub fn capacity_tiers(self) -> Result<CapacityTiers> {
        let fees: [Decimal; 10] = match self {
            Self::Bkk => [
                dec!(155),
                dec!(250),
                dec!(415),
                dec!(600),
                dec!(770),
                dec!(940),
                dec!(1800),
                dec!(2650),
                dec!(3500),
                dec!(6900),
            ],
            Self::Custom => [
                dec!(150),
                dec!(250),
                dec!(400),
                dec!(600),
                dec!(800),
                dec!(1000),
                dec!(1800),
                dec!(2600),
                dec!(3500),
                dec!(7000),
            ],
        };
        let bounds = [2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 75.0, 100.0].map(Kilowatts::from);
        let tiers = bounds
            .into_iter()
            .map(Some)
            .chain([None])
            .zip(fees)
            .map(|(up_to, fee)| CapacityTier::new(up_to, Cost::from(fee)))
            .collect();
        CapacityTiers::try_new(tiers).with_context(|| format!("invalid built-in tiers for {self}"))
    }
}
