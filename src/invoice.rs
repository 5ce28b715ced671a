//! Monthly invoice estimate from accumulated consumption.

use serde::{Deserialize, Serialize};

use crate::{
    energy_rate::RatePeriod,
    quantity::{cost::Cost, energy::KilowattHours},
    tariff::{Tariff, TariffBreakdown},
};

/// Consumption accumulated over a billing month.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    /// Energy consumed at the day rate.
    pub day: KilowattHours,

    /// Energy consumed at the night rate, weekends and holidays included.
    pub night: KilowattHours,

    /// Accumulated subsidy credit.
    pub subsidy: Cost,
}

impl MonthlyUsage {
    /// Account for energy consumed while the breakdown was in effect.
    pub fn record(&mut self, breakdown: &TariffBreakdown, energy: KilowattHours) {
        match breakdown.rate_period {
            RatePeriod::Day => self.day += energy,
            RatePeriod::Night => self.night += energy,
        }
        self.subsidy += energy * breakdown.subsidy;
    }

    #[must_use]
    pub fn total(&self) -> KilowattHours {
        self.day + self.night
    }
}

/// Grid part of a monthly invoice, all post-VAT.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceEstimate {
    pub energy: KilowattHours,
    pub day_energy_charge: Cost,
    pub night_energy_charge: Cost,
    pub capacity: Cost,
    pub consumption_tax: Cost,
    pub environmental_levy: Cost,

    /// Credited, hence subtracted from the total.
    pub subsidy: Cost,

    pub total: Cost,
}

impl Tariff {
    pub fn estimate_invoice(&self, usage: &MonthlyUsage, capacity: Cost) -> InvoiceEstimate {
        let energy = usage.total();
        let levies = self.levies.levies(self.tax_zone);

        let day_energy_charge = (usage.day * self.energy_rates.day).round_to_precision();
        let night_energy_charge = (usage.night * self.energy_rates.night).round_to_precision();
        let consumption_tax = (energy * levies.consumption_tax.post_vat).round_to_precision();
        let environmental_levy = (energy * levies.environmental_levy.post_vat).round_to_precision();
        let subsidy = usage.subsidy.round_to_precision();

        InvoiceEstimate {
            energy,
            day_energy_charge,
            night_energy_charge,
            capacity,
            consumption_tax,
            environmental_levy,
            subsidy,
            total: day_energy_charge + night_energy_charge + capacity + consumption_tax
                + environmental_levy
                - subsidy,
        }
    }
}
