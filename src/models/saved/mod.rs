// Saved events module
// Wire shape of the saved-event id list

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Response of the saved-events listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEventIds {
    #[serde(default)]
    pub saved_event_ids: Vec<i64>,
}

impl SavedEventIds {
    pub fn into_set(self) -> HashSet<i64> {
        self.saved_event_ids.into_iter().collect()
    }
}
