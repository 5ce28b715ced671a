//! Capacity charge («kapasitetsledd»): a monthly fee selected by the average of the three
//! highest daily power peaks.

pub mod peaks;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts},
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapacityTier {
    /// Inclusive upper bound, `None` for the final open-ended tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<Kilowatts>,

    /// Monthly fee.
    pub fee: Cost,
}

impl CapacityTier {
    #[must_use]
    pub const fn new(up_to: Option<Kilowatts>, fee: Cost) -> Self {
        Self { up_to, fee }
    }
}

/// Validated tier table: strictly increasing bounds, terminated by an open-ended tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CapacityTier>", into = "Vec<CapacityTier>")]
pub struct CapacityTiers(Vec<CapacityTier>);

impl TryFrom<Vec<CapacityTier>> for CapacityTiers {
    type Error = Error;

    fn try_from(tiers: Vec<CapacityTier>) -> Result<Self> {
        Self::try_new(tiers)
    }
}

impl From<CapacityTiers> for Vec<CapacityTier> {
    fn from(tiers: CapacityTiers) -> Self {
        tiers.0
    }
}

impl CapacityTiers {
    pub fn try_new(tiers: Vec<CapacityTier>) -> Result<Self> {
        let Some((last, bounded)) = tiers.split_last() else {
            bail!("the capacity tier table is empty");
        };
        ensure!(last.up_to.is_none(), "the final capacity tier must not have an upper bound");

        let mut previous = Kilowatts::ZERO;
        for (index, tier) in bounded.iter().enumerate() {
            let up_to = tier
                .up_to
                .with_context(|| format!("capacity tier #{} must have an upper bound", index + 1))?;
            ensure!(
                up_to.0.is_finite() && up_to > previous,
                "capacity tier bounds must be finite and strictly increasing: {up_to} after {previous}",
            );
            previous = up_to;
        }
        for (index, tier) in tiers.iter().enumerate() {
            ensure!(tier.fee >= Cost::ZERO, "capacity tier #{} has a negative fee", index + 1);
        }
        Ok(Self(tiers))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CapacityTier] {
        &self.0
    }

    /// Every tier with its bounds, in ascending order.
    pub fn matches(&self) -> impl Iterator<Item = CapacityTierMatch> {
        let lowers = [Kilowatts::ZERO].into_iter().chain(self.0.iter().filter_map(|tier| tier.up_to));
        self.0.iter().zip(lowers).enumerate().map(|(index, (tier, lower))| CapacityTierMatch {
            number: index + 1,
            fee: tier.fee,
            lower,
            upper: tier.up_to,
        })
    }

    /// Find the first tier whose upper bound is at or above the average power.
    ///
    /// Undefined and negative power falls into the first tier.
    pub fn lookup(&self, average_power: Kilowatts) -> CapacityTierMatch {
        let average_power = average_power.or_zero_if_nan();
        let index = self
            .0
            .iter()
            .position(|tier| tier.up_to.is_none_or(|up_to| average_power <= up_to))
            .unwrap_or(self.0.len() - 1);
        let lower = index
            .checked_sub(1)
            .and_then(|previous| self.0[previous].up_to)
            .unwrap_or(Kilowatts::ZERO);
        let tier = self.0[index];
        CapacityTierMatch { number: index + 1, fee: tier.fee, lower, upper: tier.up_to }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CapacityTierMatch {
    /// 1-based tier number.
    pub number: usize,

    pub fee: Cost,

    /// Previous tier's upper bound, zero for the first tier.
    pub lower: Kilowatts,

    /// `None` for the open-ended tier.
    pub upper: Option<Kilowatts>,
}

impl CapacityTierMatch {
    /// Human-readable range like `2-5 kW` or `>100 kW`.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// How much the average power may still grow before the next tier kicks in.
    #[must_use]
    pub fn headroom(&self, average_power: Kilowatts) -> Option<Kilowatts> {
        self.upper.map(|upper| (upper - average_power.or_zero_if_nan()).max(Kilowatts::ZERO))
    }
}

impl Display for CapacityTierMatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}-{} kW", self.lower.0, upper.0),
            None => write!(f, ">{} kW", self.lower.0),
        }
    }
}
