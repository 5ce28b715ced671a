use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type Kilowatts = Quantity<f64, 1, 0, 0>;

impl Kilowatts {
    /// Replace `NaN` with zero, so that undefined readings fall into the lowest tier.
    #[must_use]
    pub const fn or_zero_if_nan(self) -> Self {
        if self.0.is_nan() { Self::ZERO } else { self }
    }
}

impl Display for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kW", self.0)
    }
}
