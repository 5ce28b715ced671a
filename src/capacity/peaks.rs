use std::{collections::BTreeMap, fmt::Debug, fs, path::Path};

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::power::Kilowatts};

/// Number of daily peaks averaged for the capacity tier.
pub const TOP_N: usize = 3;

/// Highest power observed on each day, persisted as `{"YYYY-MM-DD": kW}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyPeaks(BTreeMap<NaiveDate, Kilowatts>);

impl FromIterator<(NaiveDate, Kilowatts)> for DailyPeaks {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, Kilowatts)>>(iterator: T) -> Self {
        let mut this = Self::default();
        for (day, power) in iterator {
            this.record(day, power);
        }
        this
    }
}

impl DailyPeaks {
    /// Raise the day's maximum if the reading exceeds it.
    ///
    /// Returns `true` when the stored maximum has changed. `NaN` readings are ignored.
    pub fn record(&mut self, day: NaiveDate, power: Kilowatts) -> bool {
        if power.0.is_nan() {
            return false;
        }
        match self.0.get_mut(&day) {
            Some(peak) if power > *peak => {
                *peak = power;
                true
            }
            Some(_) => false,
            None => {
                self.0.insert(day, power);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, day: NaiveDate) -> Option<Kilowatts> {
        self.0.get(&day).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Kilowatts)> {
        self.0.iter().map(|(day, power)| (*day, *power))
    }

    /// Peaks of the billing month the date belongs to.
    pub fn in_month(&self, date: NaiveDate) -> impl Iterator<Item = (NaiveDate, Kilowatts)> {
        self.iter().filter(move |(day, _)| day.year() == date.year() && day.month() == date.month())
    }

    /// Drop the days before the date.
    pub fn retain_since(&mut self, since: NaiveDate) {
        self.0.retain(|day, _| *day >= since);
    }

    /// Average of the top peaks in the month of `now`, with the current reading, if any,
    /// taken into account for today without storing it.
    ///
    /// Without a reading, a day with no stored peak does not count.
    #[must_use]
    pub fn monthly_average_with(&self, now: NaiveDate, current: Option<Kilowatts>) -> Kilowatts {
        let today = self.get(now).into_iter().chain(current.filter(|power| !power.0.is_nan()));
        let today = today.reduce(Kilowatts::max);
        rolling_top_average(
            self.in_month(now)
                .filter(|(day, _)| *day != now)
                .map(|(_, power)| power)
                .chain(today),
        )
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        if path.is_file() {
            let contents = fs::read(path).context("failed to read the daily peaks")?;
            let this: Self =
                serde_json::from_slice(&contents).context("failed to parse the daily peaks")?;
            debug!(n_days = this.len(), "read the daily peaks");
            Ok(this)
        } else {
            info!("no daily peaks yet, starting afresh");
            Ok(Self::default())
        }
    }

    #[instrument(skip_all, fields(path = %path.display(), n_days = self.len()))]
    pub fn write_to(&self, path: &Path) -> Result {
        fs::write(path, serde_json::to_vec_pretty(self)?).context("failed to write the daily peaks")
    }
}

/// Mean of the [`TOP_N`] largest daily peaks, or of all of them when there are fewer.
/// Zero when there are none.
#[must_use]
pub fn rolling_top_average<I>(peaks: I) -> Kilowatts
where
    I: IntoIterator<Item = Kilowatts>,
{
    let top = peaks.into_iter().map(|power| OrderedFloat(power.0)).k_largest(TOP_N).collect_vec();
    if top.is_empty() {
        Kilowatts::ZERO
    } else {
        #[expect(clippy::cast_precision_loss)]
        let n = top.len() as f64;
        Kilowatts::from(top.into_iter().map(|power| power.0).sum::<f64>() / n)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn peaks(values: &[(u32, f64)]) -> DailyPeaks {
        values.iter().map(|(n, power)| (day(1, *n), Kilowatts::from(*power))).collect()
    }

    fn average(peaks: &DailyPeaks) -> f64 {
        rolling_top_average(peaks.iter().map(|(_, power)| power)).0
    }

    #[test]
    fn test_record_keeps_maximum() {
        let mut peaks = DailyPeaks::default();
        assert!(peaks.record(day(1, 5), Kilowatts::from(3.0)));
        assert!(peaks.record(day(1, 5), Kilowatts::from(4.5)));
        assert!(!peaks.record(day(1, 5), Kilowatts::from(2.0)));
        assert!(!peaks.record(day(1, 5), Kilowatts::from(4.5)));
        assert!(!peaks.record(day(1, 5), Kilowatts::from(f64::NAN)));
        assert_eq!(peaks.get(day(1, 5)), Some(Kilowatts::from(4.5)));
        assert_eq!(peaks.len(), 1);
    }

    #[test]
    fn test_empty() {
        assert_abs_diff_eq!(average(&DailyPeaks::default()), 0.0);
    }

    #[test]
    fn test_fewer_than_three_days() {
        assert_abs_diff_eq!(average(&peaks(&[(1, 5.0)])), 5.0);
        assert_abs_diff_eq!(average(&peaks(&[(1, 4.0), (2, 6.0)])), 5.0);
    }

    #[test]
    fn test_exactly_three_days() {
        assert_abs_diff_eq!(average(&peaks(&[(1, 4.5), (2, 5.0), (3, 5.5)])), 5.0);
    }

    #[test]
    fn test_takes_top_three_regardless_of_order() {
        let expected = (5.0 + 6.0 + 7.0) / 3.0;
        assert_abs_diff_eq!(
            average(&peaks(&[(1, 3.0), (2, 4.0), (3, 5.0), (4, 6.0), (5, 7.0)])),
            expected,
        );
        assert_abs_diff_eq!(
            average(&peaks(&[(1, 7.0), (2, 3.0), (3, 6.0), (4, 4.0), (5, 5.0)])),
            expected,
        );
    }

    #[test]
    fn test_documented_example() {
        assert_abs_diff_eq!(
            average(&peaks(&[(5, 3.5), (12, 4.8), (20, 4.8)])),
            4.3667,
            epsilon = 0.0001,
        );
    }

    #[test]
    fn test_monthly_average_with_current_reading() {
        let mut peaks = peaks(&[(5, 3.5), (12, 4.8), (20, 4.8)]);
        peaks.record(day(2, 1), Kilowatts::from(9.0));
        peaks.record(day(12, 31), Kilowatts::from(9.0));

        // Other months are ignored:
        assert_abs_diff_eq!(
            peaks.monthly_average_with(day(1, 21), None).0,
            4.3667,
            epsilon = 0.0001,
        );
        // Today's reading counts without being stored:
        assert_abs_diff_eq!(
            peaks.monthly_average_with(day(1, 21), Some(Kilowatts::from(6.0))).0,
            5.2,
            epsilon = 1e-9,
        );
        assert_eq!(peaks.get(day(1, 21)), None);
        // A lower reading does not replace today's stored maximum:
        assert_abs_diff_eq!(
            peaks.monthly_average_with(day(1, 20), Some(Kilowatts::from(1.0))).0,
            4.3667,
            epsilon = 0.0001,
        );
        assert_abs_diff_eq!(peaks.monthly_average_with(day(2, 1), Some(Kilowatts::from(f64::NAN))).0, 9.0);
    }

    #[test]
    fn test_monthly_average_without_reading_skips_today() {
        let peaks = peaks(&[(5, 6.0), (12, 6.0)]);
        assert_abs_diff_eq!(peaks.monthly_average_with(day(1, 21), None).0, 6.0);
        // An actual zero reading does count as today's peak:
        assert_abs_diff_eq!(peaks.monthly_average_with(day(1, 21), Some(Kilowatts::ZERO)).0, 4.0);
    }

    #[test]
    fn test_retain_since() {
        let mut peaks = peaks(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        peaks.retain_since(day(1, 2));
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks.get(day(1, 1)), None);
    }

    #[test]
    fn test_json_layout() {
        let peaks = peaks(&[(5, 3.5), (12, 4.8)]);
        let json = serde_json::to_string(&peaks).unwrap();
        assert_eq!(json, r#"{"2026-01-05":3.5,"2026-01-12":4.8}"#);
        assert_eq!(serde_json::from_str::<DailyPeaks>(&json).unwrap(), peaks);
    }

    #[test]
    fn test_persistence() -> Result {
        let path = std::env::temp_dir().join(format!("nettleie-peaks-{}.json", std::process::id()));
        assert!(DailyPeaks::read_from(&path)?.is_empty());

        let peaks = peaks(&[(5, 3.5), (12, 4.8)]);
        peaks.write_to(&path)?;
        let restored = DailyPeaks::read_from(&path);
        fs::remove_file(&path)?;
        assert_eq!(restored?, peaks);
        Ok(())
    }
}
