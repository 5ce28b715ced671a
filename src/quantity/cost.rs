use std::fmt::{Display, Formatter};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::quantity::Quantity;

/// Norwegian krone.
pub type Cost = Quantity<Decimal, 0, 0, 1>;

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kr", self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}
