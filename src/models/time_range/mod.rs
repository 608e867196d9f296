// Time range module
// Weekly availability slot tagged with a day of the week

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Day of the week a slot belongs to.
///
/// Ordered Monday first, which is also the order the availability editor
/// shows the days in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayTag {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayTag {
    /// All days in display order
    pub const ALL: [DayTag; 7] = [
        DayTag::Mon,
        DayTag::Tue,
        DayTag::Wed,
        DayTag::Thu,
        DayTag::Fri,
        DayTag::Sat,
        DayTag::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayTag::Mon => "Mon",
            DayTag::Tue => "Tue",
            DayTag::Wed => "Wed",
            DayTag::Thu => "Thu",
            DayTag::Fri => "Fri",
            DayTag::Sat => "Sat",
            DayTag::Sun => "Sun",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayTag::Mon,
            Weekday::Tue => DayTag::Tue,
            Weekday::Wed => DayTag::Wed,
            Weekday::Thu => DayTag::Thu,
            Weekday::Fri => DayTag::Fri,
            Weekday::Sat => DayTag::Sat,
            Weekday::Sun => DayTag::Sun,
        }
    }
}

impl fmt::Display for DayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayTag {
    type Err = String;

    /// Accepts any spelling whose first three letters name a day, so
    /// "Mon", "mon" and "Monday" all parse to `DayTag::Mon`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix: String = s.trim().chars().take(3).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "mon" => Ok(DayTag::Mon),
            "tue" => Ok(DayTag::Tue),
            "wed" => Ok(DayTag::Wed),
            "thu" => Ok(DayTag::Thu),
            "fri" => Ok(DayTag::Fri),
            "sat" => Ok(DayTag::Sat),
            "sun" => Ok(DayTag::Sun),
            _ => Err(format!("Unknown day of week: '{}'", s)),
        }
    }
}

impl Serialize for DayTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Editable field of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Start,
    End,
}

/// A single availability interval on one day of the week.
///
/// No ordering is enforced between `start` and `end`; callers may hold
/// inverted or overlapping ranges while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub day: DayTag,
    #[serde(with = "wall_clock")]
    pub start: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(day: DayTag, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Build a range from "HH:MM" strings
    pub fn parse(day: DayTag, start: &str, end: &str) -> Result<Self, String> {
        Ok(Self {
            day,
            start: parse_time(start)?,
            end: parse_time(end)?,
        })
    }

    /// Whether the range ends after it starts. Advisory only; the server
    /// rejects inverted slots on submission.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    pub fn with_field(mut self, field: SlotField, value: NaiveTime) -> Self {
        match field {
            SlotField::Start => self.start = value,
            SlotField::End => self.end = value,
        }
        self
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parse a wall-clock time in "HH:MM" or "HH:MM:SS" form
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time '{}', expected HH:MM", value))
}

mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
