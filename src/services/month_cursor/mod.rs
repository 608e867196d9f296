//! Month navigation for the calendar view.

use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;

use crate::utils::date::{first_of_month, last_day_of_month, shift_month};

/// Currently displayed month, held as its first day so every cursor names a
/// month chrono can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Cursor on the current calendar month
    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Cursor on the month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// Cursor on an explicit month. Returns `None` when `month` is not 1..=12
    /// or the year is outside the supported date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        first_of_month(year, month).map(|first| Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn previous(&mut self) {
        self.shift(-1);
    }

    /// Move by any number of months in either direction. Stops at the first
    /// or last supported month instead of running past it.
    pub fn shift(&mut self, delta_months: i32) {
        let target = shift_month(self.year(), self.month(), delta_months)
            .and_then(|(year, month)| first_of_month(year, month));

        *self = match target {
            Some(first) => Self { first },
            None if delta_months > 0 => Self::containing(NaiveDate::MAX),
            None => Self::containing(NaiveDate::MIN),
        };
    }

    /// Jump back to the current calendar month
    pub fn reset_to_today(&mut self) {
        *self = Self::today();
    }

    /// Jump to the month containing `date`
    pub fn reset_to(&mut self, date: NaiveDate) {
        *self = Self::containing(date);
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        last_day_of_month(self.first)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Heading such as "February 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl Default for MonthCursor {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for MonthCursor {
    type Err = String;

    /// Parse "YYYY-MM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in '{}'", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range in '{}'", s))
    }
}
