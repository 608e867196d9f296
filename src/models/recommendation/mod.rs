// Recommendation module
// Externally scored event suggestions; the client only displays the score

use serde::{Deserialize, Serialize};

use super::event::Event;

/// An event suggested for the signed-in student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub event: Event,
    pub score: f64,
    #[serde(default)]
    pub why: String,
}

impl Recommendation {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }

    /// Score as a whole percentage, e.g. 0.834 -> 83
    pub fn match_percent(&self) -> i64 {
        (self.score * 100.0).round() as i64
    }
}

/// Display tier for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ScoreTier::High
        } else if score >= 0.6 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::High => "strong match",
            ScoreTier::Medium => "good match",
            ScoreTier::Low => "possible match",
        }
    }
}
