// Plain-text rendering for the terminal shell

use chrono::{NaiveDate, TimeZone};
use std::fmt::{Display, Write};

use event_planner::models::event::Event;
use event_planner::models::recommendation::Recommendation;
use event_planner::models::time_range::DayTag;
use event_planner::services::availability::AvailabilityStore;
use event_planner::services::calendar::{truncate_title, CalendarCell, CalendarGrid, WEEKDAY_HEADERS};

/// Display limits for a month grid
#[derive(Debug, Clone, Copy)]
pub struct GridStyle {
    pub title_max_len: usize,
    pub max_events_per_cell: usize,
}

impl GridStyle {
    fn column_width(&self) -> usize {
        self.title_max_len.max(8) + 2
    }
}

/// Draw the month as a table of seven columns, one block of lines per week.
pub fn month_grid(grid: &CalendarGrid<'_>, today: NaiveDate, style: GridStyle) -> String {
    let width = style.column_width();
    let mut out = String::new();

    let _ = writeln!(out, "{:^total$}", grid.month.label(), total = width * 7);
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{:<width$}", header, width = width);
    }
    out.push('\n');

    for week in grid.weeks() {
        let blocks: Vec<Vec<String>> = week.iter().map(|cell| cell_lines(cell, today, style)).collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

        for line in 0..height {
            for block in &blocks {
                let text = block.get(line).map(String::as_str).unwrap_or("");
                let _ = write!(out, "{:<width$}", text, width = width);
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }
    }

    out
}

fn cell_lines(cell: &CalendarCell<'_>, today: NaiveDate, style: GridStyle) -> Vec<String> {
    let day = match cell {
        CalendarCell::Blank => return Vec::new(),
        CalendarCell::Day(day) => day,
    };

    let marker = if day.is_today(today) { "*" } else { "" };
    let mut lines = vec![format!("{}{}", day.date.format("%-d"), marker)];

    for event in day.visible(style.max_events_per_cell) {
        lines.push(truncate_title(&event.title, style.title_max_len));
    }

    let overflow = day.overflow(style.max_events_per_cell);
    if overflow > 0 {
        lines.push(format!("+{} more", overflow));
    }
    lines
}

/// One line per event, with start and end shown in `tz`.
pub fn agenda<Tz>(events: &[&Event], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if events.is_empty() {
        return "No saved events this month.\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        let start = event.start.with_timezone(tz);
        let end = event.end.with_timezone(tz);
        let _ = writeln!(
            out,
            "{}  {}-{}  #{} {} @ {}",
            start.format("%a %d %b"),
            start.format("%H:%M"),
            end.format("%H:%M"),
            event.id,
            event.title,
            event.location
        );
    }
    out
}

/// Full event listing, marking events the student has saved.
pub fn event_list<Tz>(events: &[&Event], is_saved: impl Fn(i64) -> bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if events.is_empty() {
        return "No events found.\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        let mark = if is_saved(event.id) { "[saved]" } else { "" };
        let _ = writeln!(
            out,
            "#{:<5} {} ({})  {} {}",
            event.id,
            event.start.with_timezone(tz).format("%Y-%m-%d %H:%M"),
            format_duration(event.duration()),
            event.title,
            mark
        );
        let _ = writeln!(out, "       {}", event.location);

        let keywords = event.keywords();
        if !keywords.is_empty() {
            let _ = writeln!(out, "       tags: {}", keywords.join(", "));
        }
    }
    out
}

/// "1h 30m", "45m", "2h"
fn format_duration(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

pub fn recommendations(items: &[Recommendation]) -> String {
    if items.is_empty() {
        return "No recommendations yet. Fill in your profile first.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:>3}% {:<15} #{} {}",
            item.match_percent(),
            item.tier().label(),
            item.event.id,
            item.event.title
        );
        if !item.why.is_empty() {
            let _ = writeln!(out, "     {}", item.why);
        }
    }
    out
}

/// Interests followed by slots grouped Monday first
pub fn profile(interests: &[String], availability: &AvailabilityStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Interests: {}", interests.join(", "));
    let _ = writeln!(out, "Availability:");

    for day in DayTag::ALL {
        let slots = availability.slots_for_day(day);
        if slots.is_empty() {
            continue;
        }
        let ranges: Vec<String> = slots
            .iter()
            .map(|slot| format!("{}-{}", slot.start.format("%H:%M"), slot.end.format("%H:%M")))
            .collect();
        let _ = writeln!(out, "  {}: {}", day, ranges.join(", "));
    }
    out
}
