// Profile module
// Student interests and weekly availability as exchanged with the remote store

use serde::{Deserialize, Serialize};

use super::time_range::TimeRange;

/// Profile as returned by the store. A student without a profile gets
/// `exists == false` and no lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub exists: bool,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub availability: Vec<TimeRange>,
}

/// Body of a profile upsert. Replaces the stored profile wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub interests: Vec<String>,
    pub availability: Vec<TimeRange>,
}
