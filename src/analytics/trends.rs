use serde::{Deserialize, Serialize};

use crate::analytics::aggregate::DayAggregate;

/// Trend detection needs at least a week of data; below this everything
/// reads as stable.
const MIN_TREND_DAYS: usize = 7;

/// Slopes within ±0.1 per day are treated as noise.
const SLOPE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

/// Per-dimension trend classification. Stress is classified on its inverted
/// series, so `Improving` always means "getting better" regardless of
/// dimension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub mood: Trend,
    pub energy: Trend,
    pub stress: Trend,
    pub sleep: Trend,
    pub completion_rate: Trend,
}

impl TrendSummary {
    fn all_stable() -> Self {
        TrendSummary {
            mood: Trend::Stable,
            energy: Trend::Stable,
            stress: Trend::Stable,
            sleep: Trend::Stable,
            completion_rate: Trend::Stable,
        }
    }
}

/// Classify each dimension and the completion-rate series. Expects `days` in
/// chronological order, which the aggregator guarantees.
pub fn estimate_trends(days: &[DayAggregate]) -> TrendSummary {
    if days.len() < MIN_TREND_DAYS {
        return TrendSummary::all_stable();
    }

    let series = |value: fn(&DayAggregate) -> f64| -> Vec<f64> { days.iter().map(value).collect() };

    TrendSummary {
        mood: classify_series(&series(|d| d.mood as f64)),
        energy: classify_series(&series(|d| d.energy as f64)),
        // Inverted so that falling stress classifies as Improving.
        stress: classify_series(&series(|d| (6 - d.stress) as f64)),
        sleep: classify_series(&series(|d| d.sleep as f64)),
        completion_rate: classify_series(&series(|d| d.completion_rate)),
    }
}

/// Ordinary-least-squares slope against the index, thresholded into a
/// three-state label. Series shorter than a week are always `Stable`.
pub fn classify_series(values: &[f64]) -> Trend {
    if values.len() < MIN_TREND_DAYS {
        return Trend::Stable;
    }

    let slope = ols_slope(values);
    if slope > SLOPE_THRESHOLD {
        Trend::Improving
    } else if slope < -SLOPE_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}
