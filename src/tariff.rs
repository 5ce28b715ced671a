//! Everything combined into a single price breakdown.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    calendar::{HolidayCalendar, days_in_month},
    capacity::{CapacityTierMatch, CapacityTiers, peaks::DailyPeaks},
    energy_rate::{EnergyRates, RatePeriod},
    fixed_price::fixed_price,
    levy::{Levies, LevyRules, TaxZone},
    operator::GridOperator,
    prelude::*,
    quantity::{power::Kilowatts, rate::KilowattHourRate},
    subsidy::SubsidyRules,
};

/// Validated, immutable tariff of a single installation.
#[derive(Clone, Debug, bon::Builder)]
pub struct Tariff {
    #[builder(default)]
    pub grid_operator: GridOperator,

    #[builder(default)]
    pub energy_rates: EnergyRates,

    pub capacity_tiers: CapacityTiers,

    #[builder(default)]
    pub tax_zone: TaxZone,

    /// Norgespris instead of the spot price and subsidy.
    #[builder(default)]
    pub uses_fixed_price: bool,

    #[builder(default)]
    pub subsidy: SubsidyRules,

    #[builder(default)]
    pub levies: LevyRules,

    #[builder(default)]
    pub calendar: HolidayCalendar,
}

impl Tariff {
    /// Price the moment.
    ///
    /// The current power reading, when there is one, is folded into today's peak for
    /// the capacity tier. The daily peaks themselves are left untouched.
    pub fn compute(
        &self,
        at: NaiveDateTime,
        power: Option<Kilowatts>,
        spot_price: KilowattHourRate,
        daily_peaks: &DailyPeaks,
    ) -> TariffBreakdown {
        let today = at.date();
        let rate_period = RatePeriod::at(&self.calendar, at);
        let energy_rate = self.energy_rates.get(rate_period);

        let average_peak_power = daily_peaks.monthly_average_with(today, power);
        let capacity = self.capacity_tiers.lookup(average_peak_power);

        let levies = self.levies.levies(self.tax_zone);

        let (subsidy, fixed_price, electricity_price) = if self.uses_fixed_price {
            let fixed_price = fixed_price(&self.levies.zones, self.tax_zone);
            (KilowattHourRate::ZERO, Some(fixed_price), fixed_price)
        } else {
            let subsidy = self.subsidy.subsidy(spot_price);
            (subsidy, None, spot_price - subsidy)
        };

        let holidays_stale = !self.calendar.covers(today);
        if holidays_stale {
            debug!(%today, horizon = ?self.calendar.horizon(), "the holiday table does not cover the date");
        }

        TariffBreakdown {
            at,
            rate_period,
            energy_rate,
            power,
            average_peak_power,
            capacity,
            levies,
            spot_price,
            subsidy,
            fixed_price,
            electricity_price,
            total: energy_rate + levies.total.post_vat + electricity_price,
            days_in_month: days_in_month(today),
            holidays_stale,
        }
    }
}

/// Snapshot of every price component at a single moment, all per kWh unless noted.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TariffBreakdown {
    pub at: NaiveDateTime,
    pub rate_period: RatePeriod,

    /// Grid energy charge in effect.
    pub energy_rate: KilowattHourRate,

    /// Instantaneous power the breakdown was computed with, if any.
    pub power: Option<Kilowatts>,

    /// Average of the top daily peaks this month, current reading included.
    pub average_peak_power: Kilowatts,

    /// Monthly capacity fee and its tier.
    pub capacity: CapacityTierMatch,

    pub levies: Levies,
    pub spot_price: KilowattHourRate,

    /// Always zero on the fixed price.
    pub subsidy: KilowattHourRate,

    pub fixed_price: Option<KilowattHourRate>,

    /// Fixed price, or spot price after the subsidy.
    pub electricity_price: KilowattHourRate,

    /// Energy charge, levies, and electricity price.
    pub total: KilowattHourRate,

    pub days_in_month: u32,

    /// The holiday table does not cover the date, so the rate period may be wrong.
    pub holidays_stale: bool,
}

impl TariffBreakdown {
    /// Capacity fee spread over every hour of the month.
    #[must_use]
    pub fn capacity_per_kwh(&self) -> KilowattHourRate {
        KilowattHourRate::amortized(self.capacity.fee, self.days_in_month).round_to_precision()
    }

    /// Total including the amortized capacity fee.
    #[must_use]
    pub fn blended_total(&self) -> KilowattHourRate {
        self.total + self.capacity_per_kwh()
    }

    /// Grid part only: energy charge and levies.
    #[must_use]
    pub fn grid_total(&self) -> KilowattHourRate {
        self.energy_rate + self.levies.total.post_vat
    }

    /// Margin before the next capacity tier.
    #[must_use]
    pub fn capacity_headroom(&self) -> Option<Kilowatts> {
        self.capacity.headroom(self.average_peak_power)
    }
}
