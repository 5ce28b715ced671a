use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::{
    prelude::*,
    quantity::{Quantity, cost::Cost, rate::KilowattHourRate},
};

pub type KilowattHours = Quantity<f64, 1, 1, 0>;

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    /// Meter readings carry at most watt-hour resolution, so the energy is taken to 3 decimals.
    ///
    /// Energy that has no decimal representation is costed at zero, with a warning.
    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        let Some(energy) = Decimal::from_f64(self.0) else {
            warn!(energy = self.0, "energy is not representable as a decimal, costing it at zero");
            return Cost::ZERO;
        };
        Quantity(energy.round_dp(3) * rhs.0)
    }
}
