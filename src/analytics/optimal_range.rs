use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::analytics::aggregate::DayAggregate;

/// Days at or above this completion rate qualify as high performers.
const HIGH_PERFORMANCE_RATE: f64 = 80.0;

/// Share of the full range kept as top performers, rounded up.
const TOP_PERFORMER_SHARE: f64 = 0.25;

/// Closed interval of dimension values, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionRange(pub i32, pub i32);

impl DimensionRange {
    pub fn min(self) -> i32 {
        self.0
    }

    pub fn max(self) -> i32 {
        self.1
    }

    pub fn midpoint(self) -> f64 {
        (self.0 + self.1) as f64 / 2.0
    }
}

/// Per-dimension value intervals observed on the best days. Defaults apply
/// when too few days qualify: [3,5] for mood, energy and sleep, [1,3] for
/// stress (low stress is the good end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptimalMoodRange {
    pub mood: DimensionRange,
    pub energy: DimensionRange,
    pub stress: DimensionRange,
    pub sleep: DimensionRange,
}

impl Default for OptimalMoodRange {
    fn default() -> Self {
        OptimalMoodRange {
            mood: DimensionRange(3, 5),
            energy: DimensionRange(3, 5),
            stress: DimensionRange(1, 3),
            sleep: DimensionRange(3, 5),
        }
    }
}

/// Mean completion rate bucketed by composite-score tercile. Empty buckets
/// read as 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodLevelPerformance {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimalRangeAnalysis {
    pub optimal_mood_range: OptimalMoodRange,
    pub performance_by_mood_level: MoodLevelPerformance,
}

pub fn analyze_optimal_ranges(days: &[DayAggregate]) -> OptimalRangeAnalysis {
    OptimalRangeAnalysis {
        optimal_mood_range: optimal_range(days),
        performance_by_mood_level: performance_by_mood_level(days),
    }
}

fn optimal_range(days: &[DayAggregate]) -> OptimalMoodRange {
    let mut qualifying: Vec<&DayAggregate> = days
        .iter()
        .filter(|d| d.completion_rate >= HIGH_PERFORMANCE_RATE)
        .collect();
    qualifying.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(Ordering::Equal)
    });

    // Quartile size is taken from the full range, not just qualifying days.
    let quartile = ((days.len() as f64) * TOP_PERFORMER_SHARE).ceil() as usize;
    let top_performers = &qualifying[..quartile.min(qualifying.len())];

    if top_performers.is_empty() {
        return OptimalMoodRange::default();
    }

    let range = |value: fn(&DayAggregate) -> i32| -> DimensionRange {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for day in top_performers {
            min = min.min(value(day));
            max = max.max(value(day));
        }
        DimensionRange(min, max)
    };

    OptimalMoodRange {
        mood: range(|d| d.mood),
        energy: range(|d| d.energy),
        stress: range(|d| d.stress),
        sleep: range(|d| d.sleep),
    }
}

fn performance_by_mood_level(days: &[DayAggregate]) -> MoodLevelPerformance {
    let bucket_mean = |filter: fn(f64) -> bool| -> f64 {
        let rates: Vec<f64> = days
            .iter()
            .filter(|d| filter(d.composite_score))
            .map(|d| d.completion_rate)
            .collect();
        if rates.is_empty() {
            0.0
        } else {
            rates.iter().sum::<f64>() / rates.len() as f64
        }
    };

    MoodLevelPerformance {
        low: bucket_mean(|score| score <= 2.5),
        medium: bucket_mean(|score| score > 2.5 && score <= 3.5),
        high: bucket_mean(|score| score > 3.5),
    }
}
