// Property-based tests for month grids and the saved-event projection

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

use event_planner::models::event::Event;
use event_planner::services::calendar::{CalendarCell, CalendarGridBuilder};
use event_planner::services::month_cursor::MonthCursor;
use event_planner::services::saved::project;

fn event(id: i64, offset_hours: i64) -> Event {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(offset_hours);
    Event {
        id,
        title: format!("Event {}", id),
        description: String::new(),
        location: String::new(),
        start,
        end: start + Duration::hours(1),
        ai_event_type: None,
        ai_keywords: None,
        ai_summary: None,
    }
}

fn event_list() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0..40i64, 0..(24 * 400i64)), 0..60).prop_map(|raw| {
        raw.into_iter()
            .map(|(id, offset)| event(id, offset))
            .collect()
    })
}

proptest! {
    /// Property: a month grid has leading blanks plus one cell per day, and
    /// its last cell is the last day of the month
    #[test]
    fn prop_grid_length(year in 1900..2200i32, month in 1..=12u32) {
        let cursor = MonthCursor::new(year, month).unwrap();
        let grid = CalendarGridBuilder::new(Utc).build(cursor, &[]);
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let days = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .unwrap()
            .day() as usize;

        prop_assert!(grid.leading_blanks < 7);
        prop_assert_eq!(
            grid.leading_blanks as u32,
            cursor.first_day().weekday().num_days_from_sunday()
        );
        prop_assert_eq!(grid.cells.len(), grid.leading_blanks + days);

        match grid.cells.last() {
            Some(CalendarCell::Day(day)) => {
                prop_assert_eq!(day.date.day() as usize, days);
                prop_assert_eq!(day.date.month(), month);
            }
            other => prop_assert!(false, "last cell should be a day, got {:?}", other),
        }
    }

    /// Property: navigation never panics and always lands on a buildable month
    #[test]
    fn prop_shift_stays_in_range(year in -200_000..200_000i32, month in 1..=12u32, delta in any::<i32>()) {
        let mut cursor = MonthCursor::new(year, month).unwrap();
        cursor.shift(delta);

        prop_assert_eq!(cursor.first_day().day(), 1);
        prop_assert_eq!(MonthCursor::new(cursor.year(), cursor.month()), Some(cursor));
        let grid = CalendarGridBuilder::new(Utc).build(cursor, &[]);
        prop_assert_eq!(grid.cells.len(), grid.leading_blanks + cursor.days_in_month() as usize);
    }

    /// Property: every event starting in the month lands in exactly one cell
    /// and cells keep input order
    #[test]
    fn prop_grid_buckets_by_start(events in event_list(), month in 1..=12u32) {
        let cursor = MonthCursor::new(2024, month).unwrap();
        let grid = CalendarGridBuilder::new(Utc).build(cursor, &events);

        let in_month = events.iter().filter(|e| cursor.contains(e.start.date_naive())).count();
        prop_assert_eq!(grid.event_count(), in_month);

        for day in grid.days() {
            let expected: Vec<&Event> = events
                .iter()
                .filter(|e| e.start.date_naive() == day.date)
                .collect();
            prop_assert_eq!(&day.events, &expected);
        }
    }

    /// Property: the agenda is the month's events sorted by start
    #[test]
    fn prop_agenda_sorted(events in event_list(), month in 1..=12u32) {
        let cursor = MonthCursor::new(2024, month).unwrap();
        let agenda = CalendarGridBuilder::new(Utc).agenda(cursor, &events);

        prop_assert!(agenda.windows(2).all(|pair| pair[0].start <= pair[1].start));
        prop_assert!(agenda.iter().all(|e| cursor.contains(e.start.date_naive())));
    }

    /// Property: projection is an order-preserving filter on saved ids and
    /// gives the same answer every time
    #[test]
    fn prop_projection_is_subsequence(
        events in event_list(),
        saved in prop::collection::hash_set(0..40i64, 0..20),
    ) {
        let projected = project(&events, &saved);

        let expected: Vec<Event> = events
            .iter()
            .filter(|e| saved.contains(&e.id))
            .cloned()
            .collect();
        prop_assert_eq!(&projected, &expected);
        prop_assert_eq!(project(&events, &saved), projected);

        let empty: HashSet<i64> = HashSet::new();
        prop_assert!(project(&events, &empty).is_empty());
    }
}
