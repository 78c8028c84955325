use serde::{Deserialize, Serialize};

use crate::analytics::aggregate::DayAggregate;

/// Pearson correlation of each subjective-state dimension against the daily
/// completion rate, each in [-1, 1].
///
/// Stress is correlated raw, not inverted: a negative stress coefficient is
/// the expected (adaptive) direction, and the recommendation rules read the
/// sign directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationCoefficients {
    pub mood: f64,
    pub energy: f64,
    pub stress: f64,
    pub sleep: f64,
}

pub fn calculate_correlations(days: &[DayAggregate]) -> CorrelationCoefficients {
    CorrelationCoefficients {
        mood: dimension_correlation(days, |d| d.mood as f64),
        energy: dimension_correlation(days, |d| d.energy as f64),
        stress: dimension_correlation(days, |d| d.stress as f64),
        sleep: dimension_correlation(days, |d| d.sleep as f64),
    }
}

fn dimension_correlation(days: &[DayAggregate], value: fn(&DayAggregate) -> f64) -> f64 {
    let xs: Vec<f64> = days.iter().map(value).collect();
    let ys: Vec<f64> = days.iter().map(|d| d.completion_rate).collect();
    pearson(&xs, &ys)
}

/// Pearson correlation coefficient. Returns 0.0 for empty input or when
/// either series has no variance, so NaN never escapes.
pub(crate) fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n == 0 || n != ys.len() {
        return 0.0;
    }

    let n = n as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    // Clamp against float drift on perfectly-correlated series.
    ((n * sum_xy - sum_x * sum_y) / denominator).clamp(-1.0, 1.0)
}
