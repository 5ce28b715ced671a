use chrono::{Days, NaiveDate};

/// Offsets of the Norwegian movable public holidays from Easter Sunday, in days.
const MOVABLE_OFFSETS: [i64; 7] = [
    -3, // Maundy Thursday
    -2, // Good Friday
    0,  // Easter Sunday
    1,  // Easter Monday
    39, // Ascension Day
    49, // Whit Sunday
    50, // Whit Monday
];

/// Gregorian Easter Sunday (anonymous Gregorian computus).
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Movable holidays of the given year, in chronological order.
pub fn movable_holidays(year: i32) -> impl Iterator<Item = NaiveDate> {
    let easter = easter_sunday(year);
    MOVABLE_OFFSETS.into_iter().filter_map(move |offset| {
        let easter = easter?;
        if offset < 0 {
            easter.checked_sub_days(Days::new(offset.unsigned_abs()))
        } else {
            easter.checked_add_days(Days::new(offset.unsigned_abs()))
        }
    })
}
