// Property-based tests for weekly availability editing
// Every mutation must touch only the addressed slot of the addressed day

use chrono::NaiveTime;
use proptest::prelude::*;

use event_planner::models::time_range::{DayTag, SlotField, TimeRange};
use event_planner::services::availability::AvailabilityStore;

fn any_day() -> impl Strategy<Value = DayTag> {
    (0..7usize).prop_map(|i| DayTag::ALL[i])
}

fn any_time() -> impl Strategy<Value = NaiveTime> {
    (0..24u32, 0..60u32).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn any_slot() -> impl Strategy<Value = TimeRange> {
    (any_day(), any_time(), any_time()).prop_map(|(day, start, end)| TimeRange::new(day, start, end))
}

fn any_store() -> impl Strategy<Value = AvailabilityStore> {
    prop::collection::vec(any_slot(), 0..24).prop_map(AvailabilityStore::from_slots)
}

fn other_days(store: &AvailabilityStore, day: DayTag) -> Vec<TimeRange> {
    store.to_slots().into_iter().filter(|s| s.day != day).collect()
}

proptest! {
    /// Property: removing from a day with two or more slots drops exactly the
    /// addressed slot and keeps everything else in order
    #[test]
    fn prop_remove_drops_exactly_one(
        mut store in any_store(),
        day in any_day(),
        extra in (any_slot(), any_slot()),
        index in any::<prop::sample::Index>(),
    ) {
        store.add_slot(day, extra.0.start, extra.0.end);
        store.add_slot(day, extra.1.start, extra.1.end);

        let before = store.slots_for_day(day).to_vec();
        let untouched = other_days(&store, day);
        let position = index.index(before.len());

        prop_assert!(store.remove_slot(day, position));

        let mut expected = before.clone();
        expected.remove(position);
        prop_assert_eq!(store.slots_for_day(day), expected.as_slice());
        prop_assert_eq!(other_days(&store, day), untouched);
    }

    /// Property: the last slot of a day is never removed
    #[test]
    fn prop_remove_keeps_last_slot(
        slots in prop::collection::vec(any_slot(), 0..24),
        day in any_day(),
        only in any_slot(),
        position in 0..4usize,
    ) {
        let mut store = AvailabilityStore::from_slots(slots.into_iter().filter(|s| s.day != day));
        store.add_slot(day, only.start, only.end);
        let before = store.clone();

        prop_assert!(!store.remove_slot(day, position));
        prop_assert_eq!(store, before);
    }

    /// Property: an in-range edit changes one field of one slot
    #[test]
    fn prop_edit_touches_only_target(
        mut store in any_store(),
        day in any_day(),
        seed in any_slot(),
        index in any::<prop::sample::Index>(),
        use_start in any::<bool>(),
        value in any_time(),
    ) {
        store.add_slot(day, seed.start, seed.end);
        let before = store.slots_for_day(day).to_vec();
        let untouched = other_days(&store, day);
        let position = index.index(before.len());
        let field = if use_start { SlotField::Start } else { SlotField::End };

        prop_assert!(store.edit_slot(day, position, field, value));

        let mut expected = before.clone();
        expected[position] = expected[position].with_field(field, value);
        prop_assert_eq!(store.slots_for_day(day), expected.as_slice());
        prop_assert_eq!(other_days(&store, day), untouched);
    }

    /// Property: an out-of-range edit is a no-op
    #[test]
    fn prop_edit_out_of_range_is_noop(mut store in any_store(), day in any_day(), value in any_time()) {
        let before = store.clone();
        let position = store.slot_count(day);

        prop_assert!(!store.edit_slot(day, position, SlotField::End, value));
        prop_assert_eq!(store, before);
    }

    /// Property: adding appends to the day and leaves other days alone
    #[test]
    fn prop_add_appends(mut store in any_store(), new in any_slot()) {
        let mut expected = store.slots_for_day(new.day).to_vec();
        expected.push(new);
        let untouched = other_days(&store, new.day);

        store.add_slot(new.day, new.start, new.end);

        prop_assert_eq!(store.slots_for_day(new.day), expected.as_slice());
        prop_assert_eq!(other_days(&store, new.day), untouched);
    }

    /// Property: the wire list is grouped Monday first and round-trips
    #[test]
    fn prop_wire_round_trip(store in any_store()) {
        let slots = store.to_slots();
        prop_assert!(slots.windows(2).all(|pair| pair[0].day <= pair[1].day));
        prop_assert_eq!(AvailabilityStore::from_slots(slots), store);
    }
}
