//! Analysis pipeline: aggregation, correlation, pattern and trend
//! detection, optimal-range discovery, and recommendation synthesis.

pub mod aggregate;
pub mod correlations;
pub mod optimal_range;
pub mod patterns;
pub mod recommendations;
pub mod trends;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::{CompletionRecord, MoodSample};
use crate::error::InsightError;

use aggregate::DayAggregate;
use correlations::CorrelationCoefficients;
use optimal_range::OptimalMoodRange;
use recommendations::RecommendationInputs;

/// The dimension with the strongest correlation in one direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationHighlight {
    pub dimension: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInsights {
    pub strongest_positive_correlation: Option<CorrelationHighlight>,
    pub strongest_negative_correlation: Option<CorrelationHighlight>,
    pub optimal_mood_range: OptimalMoodRange,
}

/// Per-dimension means over the analyzed range, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AverageMoodScores {
    pub mood: f64,
    pub energy: f64,
    pub stress: f64,
    pub sleep: f64,
    pub composite: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatistics {
    pub total_days_analyzed: usize,
    pub avg_completion_rate: f64,
    pub avg_mood_scores: AverageMoodScores,
}

/// The engine's sole output. Plain data throughout, ready for JSON
/// transport without further encoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub correlations: CorrelationCoefficients,
    pub insights: AnalysisInsights,
    /// 1 to 5 messages, highest priority first.
    pub recommendations: Vec<String>,
    pub statistics: AnalysisStatistics,
    /// Full per-day series in date order, for downstream charting.
    pub patterns: Vec<DayAggregate>,
}

/// Run the full mood-habit analysis over one user's samples and completion
/// records for the inclusive `[start, end]` range.
///
/// Fails only with [`InsightError::NoData`] when no mood samples fall inside
/// the range; every other degenerate condition (constant series, sparse
/// data, empty partitions) resolves to a documented fallback so the
/// pipeline always completes.
pub fn analyze(
    mood_samples: &[MoodSample],
    completion_records: &[CompletionRecord],
    active_habit_count: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<AnalysisResult, InsightError> {
    let days = aggregate::build_day_aggregates(
        mood_samples,
        completion_records,
        active_habit_count,
        start,
        end,
    );
    if days.is_empty() {
        return Err(InsightError::NoData);
    }
    tracing::debug!(days = days.len(), %start, %end, "aggregated daily mood-habit data");

    let correlations = correlations::calculate_correlations(&days);
    let performance_patterns = patterns::detect_patterns(&days);
    let trend_summary = trends::estimate_trends(&days);
    let range_analysis = optimal_range::analyze_optimal_ranges(&days);
    tracing::debug!(
        high_days = performance_patterns.high_performance_days.len(),
        mood_r = correlations.mood,
        "derived correlations and patterns"
    );

    let recommendations = recommendations::generate_recommendations(&RecommendationInputs {
        correlations: &correlations,
        trends: &trend_summary,
        patterns: &performance_patterns,
        ranges: &range_analysis,
    });

    Ok(AnalysisResult {
        insights: build_insights(&correlations, range_analysis.optimal_mood_range),
        statistics: summarize(&days),
        recommendations,
        correlations,
        patterns: days,
    })
}

fn build_insights(
    correlations: &CorrelationCoefficients,
    optimal_mood_range: OptimalMoodRange,
) -> AnalysisInsights {
    let dims = [
        ("mood", correlations.mood),
        ("energy", correlations.energy),
        ("stress", correlations.stress),
        ("sleep", correlations.sleep),
    ];

    let highlight = |pick: fn(f64, f64) -> bool| -> Option<CorrelationHighlight> {
        let mut best: Option<(&str, f64)> = None;
        for (dimension, coefficient) in dims {
            let better = match best {
                Some((_, current)) => pick(coefficient, current),
                None => pick(coefficient, 0.0),
            };
            if better {
                best = Some((dimension, coefficient));
            }
        }
        best.map(|(dimension, coefficient)| CorrelationHighlight {
            dimension: dimension.to_string(),
            coefficient,
        })
    };

    AnalysisInsights {
        strongest_positive_correlation: highlight(|candidate, current| candidate > current),
        strongest_negative_correlation: highlight(|candidate, current| candidate < current),
        optimal_mood_range,
    }
}

fn summarize(days: &[DayAggregate]) -> AnalysisStatistics {
    let mean = |value: fn(&DayAggregate) -> f64| -> f64 {
        round2(days.iter().map(value).sum::<f64>() / days.len() as f64)
    };

    AnalysisStatistics {
        total_days_analyzed: days.len(),
        avg_completion_rate: mean(|d| d.completion_rate),
        avg_mood_scores: AverageMoodScores {
            mood: mean(|d| d.mood as f64),
            energy: mean(|d| d.energy as f64),
            stress: mean(|d| d.stress as f64),
            sleep: mean(|d| d.sleep as f64),
            composite: mean(|d| d.composite_score),
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample(day: u32, mood: i32) -> MoodSample {
        MoodSample {
            date: date(day),
            mood,
            energy: mood,
            stress: 6 - mood,
            sleep: mood,
        }
    }

    fn records_for(day: u32, completed: usize, total: usize) -> Vec<CompletionRecord> {
        (0..total)
            .map(|i| CompletionRecord {
                habit_id: format!("habit-{i}"),
                date: date(day),
                completed: i < completed,
            })
            .collect()
    }

    /// Two weeks alternating great and terrible days.
    fn alternating_fixture() -> (Vec<MoodSample>, Vec<CompletionRecord>) {
        let mut samples = Vec::new();
        let mut records = Vec::new();
        for day in 1..=14 {
            if day % 2 == 1 {
                samples.push(sample(day, 5));
                records.extend(records_for(day, 4, 4));
            } else {
                samples.push(sample(day, 1));
                records.extend(records_for(day, 0, 4));
            }
        }
        (samples, records)
    }

    #[test]
    fn test_no_mood_samples_is_an_error() {
        let records = records_for(1, 2, 3);
        let result = analyze(&[], &records, 3, date(1), date(31));
        assert_eq!(result.unwrap_err(), InsightError::NoData);
    }

    #[test]
    fn test_samples_outside_range_is_an_error() {
        let samples = vec![sample(1, 4)];
        let result = analyze(&samples, &[], 1, date(10), date(20));
        assert_eq!(result.unwrap_err(), InsightError::NoData);
    }

    #[test]
    fn test_alternating_scenario_end_to_end() {
        let (samples, records) = alternating_fixture();
        let result = analyze(&samples, &records, 4, date(1), date(31)).unwrap();

        assert!(result.correlations.mood > 0.95);
        assert_eq!(result.statistics.total_days_analyzed, 14);
        assert_eq!(result.statistics.avg_completion_rate, 50.0);
        assert_eq!(result.statistics.avg_mood_scores.mood, 3.0);
        assert_eq!(result.patterns.len(), 14);
        assert!(!result.recommendations.is_empty());
        assert!(result.recommendations.len() <= 5);

        let strongest = result.insights.strongest_positive_correlation.unwrap();
        assert!(strongest.coefficient > 0.95);
        // Stress correlates negatively by construction.
        let weakest = result.insights.strongest_negative_correlation.unwrap();
        assert_eq!(weakest.dimension, "stress");
        assert!(weakest.coefficient < -0.95);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let (samples, records) = alternating_fixture();
        let first = analyze(&samples, &records, 4, date(1), date(31)).unwrap();
        let second = analyze(&samples, &records, 4, date(1), date(31)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_no_positive_highlight_when_all_negative() {
        let correlations = CorrelationCoefficients {
            mood: -0.4,
            energy: -0.2,
            stress: -0.6,
            sleep: -0.1,
        };
        let insights = build_insights(&correlations, OptimalMoodRange::default());
        assert!(insights.strongest_positive_correlation.is_none());
        let negative = insights.strongest_negative_correlation.unwrap();
        assert_eq!(negative.dimension, "stress");
    }

    #[test]
    fn test_statistics_rounded_to_two_decimals() {
        // Three days with completion rates 100, 50, 0 -> mean 50; mood
        // 5, 4, 4 -> 4.333... -> 4.33.
        let samples = vec![sample(1, 5), sample(2, 4), sample(3, 4)];
        let mut records = records_for(1, 2, 2);
        records.extend(records_for(2, 1, 2));
        records.extend(records_for(3, 0, 2));

        let result = analyze(&samples, &records, 2, date(1), date(31)).unwrap();
        assert_eq!(result.statistics.avg_completion_rate, 50.0);
        assert_eq!(result.statistics.avg_mood_scores.mood, 4.33);
    }

    #[test]
    fn test_every_numeric_output_is_finite() {
        // Constant everything: zero variance in each series.
        let samples: Vec<MoodSample> = (1..=10).map(|d| sample(d, 3)).collect();
        let result = analyze(&samples, &[], 0, date(1), date(31)).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        fn assert_finite(value: &serde_json::Value) {
            match value {
                serde_json::Value::Number(n) => {
                    assert!(n.as_f64().map(f64::is_finite).unwrap_or(true))
                }
                serde_json::Value::Array(items) => items.iter().for_each(assert_finite),
                serde_json::Value::Object(map) => map.values().for_each(assert_finite),
                _ => {}
            }
        }
        assert_finite(&json);
        assert_eq!(result.correlations.mood, 0.0);
    }
}
