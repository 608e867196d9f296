//! Weekly availability store.
//!
//! Slots are grouped per day so that edits and removals address a slot by
//! its position among that day's slots. The wire format is a single flat
//! list; conversion happens only in [`AvailabilityStore::from_slots`] and
//! [`AvailabilityStore::to_slots`].

use chrono::NaiveTime;
use std::collections::BTreeMap;

use crate::models::time_range::{DayTag, SlotField, TimeRange};

/// Availability slots keyed by day, each day keeping insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityStore {
    days: BTreeMap<DayTag, Vec<TimeRange>>,
}

impl AvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat slot list by day. Relative order within a day is kept.
    pub fn from_slots(slots: impl IntoIterator<Item = TimeRange>) -> Self {
        let mut store = Self::new();
        for slot in slots {
            store.days.entry(slot.day).or_default().push(slot);
        }
        store
    }

    /// Flatten back into the wire list, Monday first.
    pub fn to_slots(&self) -> Vec<TimeRange> {
        self.days.values().flatten().copied().collect()
    }

    /// Slots for one day in insertion order
    pub fn slots_for_day(&self, day: DayTag) -> &[TimeRange] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slot_count(&self, day: DayTag) -> usize {
        self.slots_for_day(day).len()
    }

    /// Total number of slots across all days
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a slot to the end of `day`'s list.
    pub fn add_slot(&mut self, day: DayTag, start: NaiveTime, end: NaiveTime) {
        self.days
            .entry(day)
            .or_default()
            .push(TimeRange::new(day, start, end));
    }

    /// Replace one field of the `position`-th slot of `day`.
    ///
    /// Returns `false` and leaves the store untouched when `day` has no slot
    /// at that position.
    pub fn edit_slot(
        &mut self,
        day: DayTag,
        position: usize,
        field: SlotField,
        value: NaiveTime,
    ) -> bool {
        let Some(slot) = self.days.get_mut(&day).and_then(|slots| slots.get_mut(position)) else {
            log::debug!("No {} slot at position {}; edit ignored", day, position);
            return false;
        };

        *slot = slot.with_field(field, value);
        true
    }

    /// Remove the `position`-th slot of `day`.
    ///
    /// A day never loses its last slot: when `day` has one slot or fewer, or
    /// `position` is out of range, nothing changes and `false` is returned.
    pub fn remove_slot(&mut self, day: DayTag, position: usize) -> bool {
        let Some(slots) = self.days.get_mut(&day) else {
            return false;
        };

        if slots.len() <= 1 || position >= slots.len() {
            return false;
        }

        slots.remove(position);
        true
    }
}
