//! Saved events: projection of the event list onto the saved-id set, the
//! local saved-id state behind the save buttons, and the combined loader.

use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::event::Event;
use crate::services::api::{EventsApi, SavedEventsApi};

/// Keep the events whose id is in `saved_ids`, in their original order.
pub fn project(all_events: &[Event], saved_ids: &HashSet<i64>) -> Vec<Event> {
    all_events
        .iter()
        .filter(|event| saved_ids.contains(&event.id))
        .cloned()
        .collect()
}

/// Fetch the event list and the saved-id set concurrently and project them.
///
/// Both requests must succeed; if either fails the whole load fails and no
/// partial result is produced.
pub async fn load_saved_events<A>(api: &A) -> Result<SavedEvents, ApiError>
where
    A: EventsApi + SavedEventsApi + ?Sized,
{
    let (events, saved) = tokio::try_join!(api.list_events(), api.list_saved())?;
    let saved_ids = saved.into_set();
    let projected = project(&events, &saved_ids);

    log::info!(
        "Loaded {} saved events out of {} listed",
        projected.len(),
        events.len()
    );

    Ok(SavedEvents {
        state: SavedEventsState::new(saved_ids),
        events: projected,
    })
}

/// Saved-id state as seen by the current session.
///
/// Ids enter the set only after the store confirms the save. An id with a
/// request in flight is held in `pending` so a second click cannot issue a
/// duplicate call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedEventsState {
    saved: HashSet<i64>,
    pending: HashSet<i64>,
}

impl SavedEventsState {
    pub fn new(saved: HashSet<i64>) -> Self {
        Self {
            saved,
            pending: HashSet::new(),
        }
    }

    pub fn is_saved(&self, event_id: i64) -> bool {
        self.saved.contains(&event_id)
    }

    pub fn is_pending(&self, event_id: i64) -> bool {
        self.pending.contains(&event_id)
    }

    /// Whether a save button for `event_id` should be enabled
    pub fn can_save(&self, event_id: i64) -> bool {
        !self.is_saved(event_id) && !self.is_pending(event_id)
    }

    pub fn saved_ids(&self) -> &HashSet<i64> {
        &self.saved
    }

    /// Mark `event_id` as in flight. Returns `false` if it is already saved
    /// or pending, in which case no request should be sent.
    pub fn begin_save(&mut self, event_id: i64) -> bool {
        if !self.can_save(event_id) {
            return false;
        }
        self.pending.insert(event_id)
    }

    /// Mark `event_id` as in flight for removal. Returns `false` if it is not
    /// saved or already pending.
    pub fn begin_unsave(&mut self, event_id: i64) -> bool {
        if !self.is_saved(event_id) || self.is_pending(event_id) {
            return false;
        }
        self.pending.insert(event_id)
    }

    /// Record the outcome of a save started with [`Self::begin_save`].
    pub fn finish_save(&mut self, event_id: i64, succeeded: bool) {
        self.pending.remove(&event_id);
        if succeeded {
            self.saved.insert(event_id);
        }
    }

    /// Record the outcome of an unsave started with [`Self::begin_unsave`].
    pub fn finish_unsave(&mut self, event_id: i64, succeeded: bool) {
        self.pending.remove(&event_id);
        if succeeded {
            self.saved.remove(&event_id);
        }
    }

    /// Save `event_id` through `api`.
    ///
    /// A failure is logged and leaves the state unchanged; it is not
    /// reported to the caller. Returns whether the id is now saved by this
    /// call.
    pub async fn save<A: SavedEventsApi + ?Sized>(&mut self, api: &A, event_id: i64) -> bool {
        if !self.begin_save(event_id) {
            log::debug!("Event {} already saved or pending; not sending", event_id);
            return false;
        }

        let result = api.save_event(event_id).await;
        if let Err(err) = &result {
            log::warn!("Failed to save event {}: {}", event_id, err);
        }
        self.finish_save(event_id, result.is_ok());
        result.is_ok()
    }

    /// Unsave `event_id` through `api`. Failures are logged and swallowed.
    pub async fn unsave<A: SavedEventsApi + ?Sized>(&mut self, api: &A, event_id: i64) -> bool {
        if !self.begin_unsave(event_id) {
            log::debug!("Event {} not saved or pending; not sending", event_id);
            return false;
        }

        let result = api.unsave_event(event_id).await;
        if let Err(err) = &result {
            log::warn!("Failed to unsave event {}: {}", event_id, err);
        }
        self.finish_unsave(event_id, result.is_ok());
        result.is_ok()
    }
}

/// Projected saved events plus the id state they were derived from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedEvents {
    pub state: SavedEventsState,
    pub events: Vec<Event>,
}

impl SavedEvents {
    /// Unsave an event and drop it from the projected list on success.
    pub async fn unsave<A: SavedEventsApi + ?Sized>(&mut self, api: &A, event_id: i64) -> bool {
        let removed = self.state.unsave(api, event_id).await;
        if removed {
            self.events.retain(|event| event.id != event_id);
        }
        removed
    }
}
