//! Profile editor: interests plus weekly availability, validated locally
//! before being submitted as a whole to the profile store.

use chrono::NaiveTime;

use super::availability::AvailabilityStore;
use crate::error::{ApiError, ValidationError};
use crate::models::profile::{ProfilePayload, ProfileResponse};
use crate::models::time_range::DayTag;
use crate::services::api::ProfileApi;

/// Slot given to a new day, and to an empty profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDefaults {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for SlotDefaults {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Why a submission did not go through
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] ApiError),
}

impl SubmitError {
    /// Message for the form's error banner
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(err) => err.to_string(),
            SubmitError::Remote(err) => err.user_message("Failed to save profile"),
        }
    }
}

/// Editable profile form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    interests: Vec<String>,
    availability: AvailabilityStore,
    defaults: SlotDefaults,
}

impl ProfileEditor {
    /// Blank form: one empty interest and a single Monday slot
    pub fn new(defaults: SlotDefaults) -> Self {
        let mut availability = AvailabilityStore::new();
        availability.add_slot(DayTag::Mon, defaults.start, defaults.end);

        Self {
            interests: vec![String::new()],
            availability,
            defaults,
        }
    }

    /// Populate from the store. Missing profiles and empty lists fall back
    /// to the blank form's contents.
    pub fn from_response(response: ProfileResponse, defaults: SlotDefaults) -> Self {
        let mut editor = Self::new(defaults);
        if !response.exists {
            return editor;
        }

        if !response.interests.is_empty() {
            editor.interests = response.interests;
        }
        if !response.availability.is_empty() {
            editor.availability = AvailabilityStore::from_slots(response.availability);
        }
        editor
    }

    /// Fetch the stored profile into a new editor
    pub async fn load<A: ProfileApi + ?Sized>(
        api: &A,
        defaults: SlotDefaults,
    ) -> Result<Self, ApiError> {
        let response = api.get_profile().await?;
        log::debug!(
            "Loaded profile (exists: {}, {} slots)",
            response.exists,
            response.availability.len()
        );
        Ok(Self::from_response(response, defaults))
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn availability(&self) -> &AvailabilityStore {
        &self.availability
    }

    pub fn availability_mut(&mut self) -> &mut AvailabilityStore {
        &mut self.availability
    }

    pub fn set_interest(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.interests.get_mut(index) {
            Some(interest) => {
                *interest = value.into();
                true
            }
            None => false,
        }
    }

    /// Append a blank interest row
    pub fn add_interest(&mut self) {
        self.interests.push(String::new());
    }

    /// Remove an interest row. The last row is never removed.
    pub fn remove_interest(&mut self, index: usize) -> bool {
        if self.interests.len() <= 1 || index >= self.interests.len() {
            return false;
        }
        self.interests.remove(index);
        true
    }

    /// Add a default slot to `day`
    pub fn add_slot(&mut self, day: DayTag) {
        self.availability
            .add_slot(day, self.defaults.start, self.defaults.end);
    }

    /// Build the upsert body: trimmed, non-blank interests and the flattened
    /// availability list.
    pub fn submission(&self) -> Result<ProfilePayload, ValidationError> {
        let interests = normalize_interests(&self.interests)?;
        Ok(ProfilePayload {
            interests,
            availability: self.availability.to_slots(),
        })
    }

    /// Validate locally, then replace the stored profile.
    pub async fn submit<A: ProfileApi + ?Sized>(&self, api: &A) -> Result<(), SubmitError> {
        let payload = self.submission()?;
        api.upsert_profile(&payload).await?;
        log::info!(
            "Saved profile with {} interests and {} slots",
            payload.interests.len(),
            payload.availability.len()
        );
        Ok(())
    }
}

/// Trim interests and drop blank ones; at least one must remain.
pub fn normalize_interests(interests: &[String]) -> Result<Vec<String>, ValidationError> {
    let kept: Vec<String> = interests
        .iter()
        .map(|interest| interest.trim())
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect();

    if kept.is_empty() {
        return Err(ValidationError::InterestsRequired);
    }
    Ok(kept)
}
