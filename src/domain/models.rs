use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One subjective-state check-in per calendar day. Each dimension is an
/// integer in 1..=5; uniqueness per date is enforced upstream by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoodSample {
    pub date: NaiveDate,
    pub mood: i32,
    pub energy: i32,
    pub stress: i32,
    pub sleep: i32,
}

impl MoodSample {
    /// Single-number blend of the four dimensions, always in [1, 5].
    /// Stress is inverted: high stress pulls the score down.
    pub fn composite_score(&self) -> f64 {
        (self.mood + self.energy + (6 - self.stress) + self.sleep) as f64 / 4.0
    }
}

/// One habit's completion status on one date. A day typically has several,
/// one per habit tracked that day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
}
