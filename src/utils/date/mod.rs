// Date utility functions

use chrono::{Datelike, NaiveDate};

/// Shift a (year, month) pair by `delta_months`, rolling the year over.
/// `month` is 1-based. Returns `None` if the resulting year does not fit.
pub fn shift_month(year: i32, month: u32, delta_months: i32) -> Option<(i32, u32)> {
    let total_months = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta_months);
    let new_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let new_month = total_months.rem_euclid(12) as u32 + 1;
    Some((new_year, new_month))
}

/// First day of the month, or `None` outside chrono's supported range.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Number of days in the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    // every month has a 28th
    [31, 30, 29]
        .into_iter()
        .find(|&day| date.with_day(day).is_some())
        .unwrap_or(28)
}

/// Weekday index of `date`, Sunday = 0 .. Saturday = 6.
pub fn weekday_from_sunday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
