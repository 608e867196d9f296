//! Month calendar grid.
//!
//! Weeks start on Sunday: the grid opens with one blank cell per weekday
//! between Sunday and the first of the month (Sunday = 0 .. Saturday = 6),
//! followed by one cell per day. Events are bucketed under the local date of
//! their start instant only, so a multi-day event appears on its first day.

use chrono::{Datelike, NaiveDate, TimeZone};
use std::collections::HashMap;

use super::month_cursor::MonthCursor;
use crate::models::event::Event;
use crate::utils::date::weekday_from_sunday;

/// Short weekday headings in grid column order
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A single cell of the month grid
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell<'a> {
    /// Padding before the first of the month
    Blank,
    Day(DayCell<'a>),
}

impl<'a> CalendarCell<'a> {
    pub fn as_day(&self) -> Option<&DayCell<'a>> {
        match self {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        }
    }
}

/// A numbered day and the events starting on it, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
}

impl<'a> DayCell<'a> {
    /// The first `limit` events, for compact display
    pub fn visible(&self, limit: usize) -> &[&'a Event] {
        &self.events[..self.events.len().min(limit)]
    }

    /// How many events did not fit in `limit` ("+N more")
    pub fn overflow(&self, limit: usize) -> usize {
        self.events.len().saturating_sub(limit)
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// Grid for one month: leading blanks then one cell per day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid<'a> {
    pub month: MonthCursor,
    pub leading_blanks: usize,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Rows of seven cells; the last row may be shorter
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.cells.iter().filter_map(CalendarCell::as_day)
    }

    pub fn day(&self, day_of_month: u32) -> Option<&DayCell<'a>> {
        let index = self.leading_blanks + day_of_month.checked_sub(1)? as usize;
        self.cells.get(index).and_then(CalendarCell::as_day)
    }

    /// Total number of events placed in this month's cells
    pub fn event_count(&self) -> usize {
        self.days().map(|day| day.events.len()).sum()
    }
}

/// Builds month grids, reading event start instants in `tz`.
pub struct CalendarGridBuilder<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> CalendarGridBuilder<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Calendar date an event is filed under
    pub fn date_key(&self, event: &Event) -> NaiveDate {
        event.start.with_timezone(&self.tz).date_naive()
    }

    pub fn build<'a>(&self, month: MonthCursor, events: &'a [Event]) -> CalendarGrid<'a> {
        let leading_blanks = weekday_from_sunday(month.first_day()) as usize;
        let days_in_month = month.days_in_month();

        let mut buckets: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events {
            let key = self.date_key(event);
            if month.contains(key) {
                buckets.entry(key).or_default().push(event);
            }
        }

        let mut cells = Vec::with_capacity(leading_blanks + days_in_month as usize);
        cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading_blanks));

        let first = month.first_day();
        // iter_days() stops short of the last supported date
        for date in (1..=days_in_month).filter_map(|day| first.with_day(day)) {
            cells.push(CalendarCell::Day(DayCell {
                date,
                events: buckets.remove(&date).unwrap_or_default(),
            }));
        }

        log::debug!(
            "Built calendar for {}: {} blanks, {} days",
            month,
            leading_blanks,
            days_in_month
        );

        CalendarGrid {
            month,
            leading_blanks,
            cells,
        }
    }

    /// Events starting in `month`, earliest first. Ties keep input order.
    pub fn agenda<'a>(&self, month: MonthCursor, events: &'a [Event]) -> Vec<&'a Event> {
        let mut in_month: Vec<&Event> = events
            .iter()
            .filter(|event| month.contains(self.date_key(event)))
            .collect();
        in_month.sort_by_key(|event| event.start);
        in_month
    }
}

/// Shorten `text` to `max_len` characters, the last three being "..." when
/// cut. Text already within the limit is returned unchanged. A limit below 3
/// still yields the bare "...", so the result can exceed `max_len` there.
pub fn truncate_title(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}
