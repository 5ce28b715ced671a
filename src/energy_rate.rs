use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{calendar::HolidayCalendar, quantity::rate::KilowattHourRate};

/// First hour of the day rate, inclusive.
pub const DAY_START_HOUR: u32 = 6;

/// First hour of the night rate, inclusive.
pub const NIGHT_START_HOUR: u32 = 22;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatePeriod {
    Day,
    Night,
}

impl Display for RatePeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "Day"),
            Self::Night => write!(f, "Night"),
        }
    }
}

impl RatePeriod {
    /// Day rate applies on working days from 06:00 until 22:00.
    /// Weekends and holidays are charged at the night rate around the clock.
    #[must_use]
    pub fn at(calendar: &HolidayCalendar, at: NaiveDateTime) -> Self {
        let is_weekend = matches!(at.weekday(), Weekday::Sat | Weekday::Sun);
        let is_day_hours = (DAY_START_HOUR..NIGHT_START_HOUR).contains(&at.hour());
        if is_day_hours && !is_weekend && !calendar.is_holiday(at.date()) {
            Self::Day
        } else {
            Self::Night
        }
    }
}

#[must_use]
pub fn is_day_rate(calendar: &HolidayCalendar, at: NaiveDateTime) -> bool {
    RatePeriod::at(calendar, at) == RatePeriod::Day
}

/// Time-of-use energy charge («energiledd»).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyRates {
    pub day: KilowattHourRate,
    pub night: KilowattHourRate,
}

impl EnergyRates {
    #[must_use]
    pub const fn get(&self, period: RatePeriod) -> KilowattHourRate {
        match period {
            RatePeriod::Day => self.day,
            RatePeriod::Night => self.night,
        }
    }

    #[must_use]
    pub fn select(&self, calendar: &HolidayCalendar, at: NaiveDateTime) -> KilowattHourRate {
        self.get(RatePeriod::at(calendar, at))
    }
}

impl Default for EnergyRates {
    fn default() -> Self {
        Self { day: KilowattHourRate::from(dec!(0.4613)), night: KilowattHourRate::from(dec!(0.2329)) }
    }
}
