// Event module
// Campus event as served by the remote store, plus the draft used to create one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Event owned by the remote store.
///
/// The client only reads these; bucketing uses `id` and `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "start_datetime", with = "wire_instant")]
    pub start: DateTime<Utc>,
    #[serde(rename = "end_datetime", with = "wire_instant")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub ai_event_type: Option<String>,
    #[serde(default)]
    pub ai_keywords: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
}

impl Event {
    /// Derived keyword tags, trimmed and without blanks
    pub fn keywords(&self) -> Vec<&str> {
        self.ai_keywords
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// New event submitted by an administrator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "start_datetime", with = "wire_instant")]
    pub start: DateTime<Utc>,
    #[serde(rename = "end_datetime", with = "wire_instant")]
    pub end: DateTime<Utc>,
}

impl EventDraft {
    /// Create a builder for constructing drafts field by field
    pub fn builder() -> EventDraftBuilder {
        EventDraftBuilder::default()
    }

    /// Validate the draft before it is sent anywhere
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        if self.end <= self.start {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(())
    }
}

/// Builder for event drafts
#[derive(Debug, Default)]
pub struct EventDraftBuilder {
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl EventDraftBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Build and validate the draft
    pub fn build(self) -> Result<EventDraft, ValidationError> {
        let draft = EventDraft {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            start: self.start.ok_or(ValidationError::MissingField("start"))?,
            end: self.end.ok_or(ValidationError::MissingField("end"))?,
        };

        draft.validate()?;
        Ok(draft)
    }
}

/// Instants on the wire. The store echoes back whatever it persisted, which
/// may lose the offset; offset-less values are read as UTC.
pub(crate) mod wire_instant {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("Invalid timestamp '{}': {}", raw, e))
    }
}
