//! Public holiday calendar.
//!
//! Fixed holidays recur on the same month and day every year. Movable holidays follow Easter
//! and are either computed or taken from a curated table. A curated table has a finite
//! horizon: dates in years it does not list are never classified as holidays, and
//! [`HolidayCalendar::covers`] reports that so the caller can flag the table as stale.

pub mod easter;

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{Datelike, Months, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::prelude::*;

/// Recurring `MM-DD` date.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn try_new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so February 29th is accepted:
        ensure!(NaiveDate::from_ymd_opt(2000, month, day).is_some(), "invalid date: {month:02}-{day:02}");
        Ok(Self { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { month: date.month(), day: date.day() }
    }

    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (month, day) = s.split_once('-').with_context(|| format!("expected `MM-DD`: `{s}`"))?;
        Self::try_new(
            month.parse().with_context(|| format!("invalid month: `{s}`"))?,
            day.parse().with_context(|| format!("invalid day: `{s}`"))?,
        )
    }
}

impl Display for MonthDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MovableHolidays {
    /// Derived from Easter Sunday for any year.
    Computed,

    /// Explicit dates, maintained by hand.
    Curated { dates: BTreeSet<NaiveDate> },
}

impl MovableHolidays {
    /// The hand-maintained Norwegian table for 2025–2027.
    #[must_use]
    pub fn norwegian_2025_2027() -> Self {
        let dates = [2025, 2026, 2027].into_iter().flat_map(easter::movable_holidays).collect();
        Self::Curated { dates }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HolidayKind {
    Fixed,
    Movable,
}

impl Display for HolidayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Movable => write!(f, "Movable"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HolidayCalendar {
    pub fixed: BTreeSet<MonthDay>,
    pub movable: MovableHolidays,
}

impl Default for HolidayCalendar {
    /// Norwegian public holidays.
    fn default() -> Self {
        let fixed = [(1, 1), (5, 1), (5, 17), (12, 25), (12, 26)]
            .into_iter()
            .map(|(month, day)| MonthDay { month, day })
            .collect();
        Self { fixed, movable: MovableHolidays::Computed }
    }
}

impl HolidayCalendar {
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.fixed.contains(&MonthDay::of(date))
            || match &self.movable {
                MovableHolidays::Computed => {
                    easter::movable_holidays(date.year()).contains(&date)
                }
                MovableHolidays::Curated { dates } => dates.contains(&date),
            }
    }

    /// Whether the movable holiday table has any entries for the date's year.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.covers_year(date.year())
    }

    /// Whether the movable holiday table has any entries for the year.
    ///
    /// Gaps within a curated table are not covered, nor are the years before it starts.
    #[must_use]
    pub fn covers_year(&self, year: i32) -> bool {
        match &self.movable {
            MovableHolidays::Computed => true,
            MovableHolidays::Curated { dates } => dates.iter().any(|curated| curated.year() == year),
        }
    }

    /// Last year listed in a curated table, `None` when unbounded.
    #[must_use]
    pub fn horizon(&self) -> Option<i32> {
        match &self.movable {
            MovableHolidays::Computed => None,
            MovableHolidays::Curated { dates } => Some(dates.last().map_or(i32::MIN, Datelike::year)),
        }
    }

    /// All holidays falling within the year, in chronological order.
    #[must_use]
    pub fn holidays_in(&self, year: i32) -> Vec<(NaiveDate, HolidayKind)> {
        let fixed = self
            .fixed
            .iter()
            .filter_map(|month_day| month_day.in_year(year))
            .map(|date| (date, HolidayKind::Fixed));
        let movable = match &self.movable {
            MovableHolidays::Computed => easter::movable_holidays(year).collect_vec(),
            MovableHolidays::Curated { dates } => {
                dates.iter().copied().filter(|date| date.year() == year).collect_vec()
            }
        };
        fixed
            .chain(movable.into_iter().map(|date| (date, HolidayKind::Movable)))
            .sorted_by_key(|(date, kind)| (*date, *kind == HolidayKind::Movable))
            .collect()
    }
}

/// Number of days in the month of the date.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .map_or(31, |next| u32::try_from((next - first).num_days()).unwrap_or(31))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_fixed_holidays() {
        let calendar = HolidayCalendar::default();
        for (month, day) in [(1, 1), (5, 1), (5, 17), (12, 25), (12, 26)] {
            assert!(calendar.is_holiday(date(2026, month, day)));
            assert!(calendar.is_holiday(date(2031, month, day)));
        }
        assert!(!calendar.is_holiday(date(2026, 1, 2)));
        assert!(!calendar.is_holiday(date(2026, 12, 24)));
    }

    #[test]
    fn test_computed_movable_holidays() {
        let calendar = HolidayCalendar::default();
        assert!(calendar.is_holiday(date(2026, 4, 3)));
        assert!(calendar.is_holiday(date(2026, 5, 14)));
        assert!(calendar.is_holiday(date(2030, 4, 19)));
        assert!(!calendar.is_holiday(date(2026, 4, 4)));
        assert!(calendar.covers(date(2099, 1, 1)));
        assert_eq!(calendar.horizon(), None);
    }

    #[test]
    fn test_curated_horizon() {
        let calendar = HolidayCalendar {
            movable: MovableHolidays::norwegian_2025_2027(),
            ..HolidayCalendar::default()
        };
        assert!(calendar.is_holiday(date(2027, 3, 26)));
        assert!(calendar.covers(date(2027, 12, 31)));
        assert_eq!(calendar.horizon(), Some(2027));

        // Good Friday 2028 is beyond the table:
        assert!(!calendar.covers(date(2028, 4, 14)));
        assert!(!calendar.is_holiday(date(2028, 4, 14)));
        // Fixed holidays keep working:
        assert!(calendar.is_holiday(date(2028, 5, 17)));
    }

    #[test]
    fn test_curated_gaps_and_earlier_years_are_not_covered() {
        let calendar = HolidayCalendar {
            movable: MovableHolidays::Curated {
                dates: BTreeSet::from([date(2025, 4, 18), date(2027, 3, 26)]),
            },
            ..HolidayCalendar::default()
        };
        assert!(calendar.covers_year(2025));
        assert!(!calendar.covers_year(2026));
        assert!(calendar.covers_year(2027));
        assert!(!calendar.covers_year(2024));
        assert!(!calendar.covers(date(2026, 4, 3)));
        // The horizon alone would miss the gap:
        assert_eq!(calendar.horizon(), Some(2027));
    }

    #[test]
    fn test_empty_curated_table_covers_nothing() {
        let calendar = HolidayCalendar {
            movable: MovableHolidays::Curated { dates: BTreeSet::new() },
            ..HolidayCalendar::default()
        };
        assert!(!calendar.covers(date(2026, 1, 1)));
        assert_eq!(calendar.horizon(), Some(i32::MIN));
    }

    #[test]
    fn test_holidays_in() {
        let holidays = HolidayCalendar::default().holidays_in(2027);
        assert_eq!(holidays.len(), 12);
        assert_eq!(holidays[0], (date(2027, 1, 1), HolidayKind::Fixed));
        // Whit Monday falls on Constitution Day, both are listed:
        assert_eq!(
            holidays.iter().filter(|(holiday, _)| *holiday == date(2027, 5, 17)).count(),
            2,
        );
    }

    #[test]
    fn test_month_day_parsing() {
        assert_eq!("05-17".parse::<MonthDay>().unwrap(), MonthDay { month: 5, day: 17 });
        assert_eq!("02-29".parse::<MonthDay>().unwrap().to_string(), "02-29");
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("04-31".parse::<MonthDay>().is_err());
        assert!("0517".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_calendar_from_toml() {
        let calendar: HolidayCalendar = toml::from_str(
            r#"
            fixed = ["01-01", "12-25"]

            [movable]
            kind = "curated"
            dates = ["2026-04-03"]
            "#,
        )
        .unwrap();
        assert!(calendar.is_holiday(date(2026, 4, 3)));
        assert!(!calendar.is_holiday(date(2026, 5, 17)));
        assert_eq!(calendar.horizon(), Some(2026));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2026, 1, 26)), 31);
        assert_eq!(days_in_month(date(2026, 2, 10)), 28);
        assert_eq!(days_in_month(date(2028, 2, 10)), 29);
        assert_eq!(days_in_month(date(2026, 4, 30)), 30);
        assert_eq!(days_in_month(date(2026, 12, 31)), 31);
    }
}
