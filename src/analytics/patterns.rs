use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::analytics::aggregate::DayAggregate;

/// High/low performance day subsets plus half-over-half momentum flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePatterns {
    /// Top third of days by completion rate, ties kept in date order.
    pub high_performance_days: Vec<DayAggregate>,
    /// Bottom third of days by completion rate.
    pub low_performance_days: Vec<DayAggregate>,
    pub trends: MomentumFlags,
}

/// Did the second half of the range average better than the first?
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MomentumFlags {
    pub improving_mood: bool,
    pub improving_habits: bool,
}

pub fn detect_patterns(days: &[DayAggregate]) -> PerformancePatterns {
    if days.is_empty() {
        return PerformancePatterns {
            high_performance_days: Vec::new(),
            low_performance_days: Vec::new(),
            trends: MomentumFlags::default(),
        };
    }

    let mut by_rate: Vec<&DayAggregate> = days.iter().collect();
    // Stable sort: equal rates keep their chronological order.
    by_rate.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(Ordering::Equal)
    });

    let third = days.len() / 3;
    let high_performance_days: Vec<DayAggregate> =
        by_rate[..third].iter().map(|d| (*d).clone()).collect();
    let low_performance_days: Vec<DayAggregate> = by_rate[by_rate.len() - third..]
        .iter()
        .map(|d| (*d).clone())
        .collect();

    PerformancePatterns {
        high_performance_days,
        low_performance_days,
        trends: momentum_flags(days),
    }
}

fn momentum_flags(days: &[DayAggregate]) -> MomentumFlags {
    if days.len() < 2 {
        return MomentumFlags::default();
    }

    // The aggregator emits days in date order; sort again here so a caller
    // handing us a reshuffled slice cannot silently invert the comparison.
    let mut chronological: Vec<&DayAggregate> = days.iter().collect();
    chronological.sort_by_key(|d| d.date);

    let midpoint = chronological.len() / 2;
    let (first, second) = chronological.split_at(midpoint);

    MomentumFlags {
        improving_mood: mean(second, |d| d.composite_score) > mean(first, |d| d.composite_score),
        improving_habits: mean(second, |d| d.completion_rate) > mean(first, |d| d.completion_rate),
    }
}

fn mean(days: &[&DayAggregate], value: fn(&DayAggregate) -> f64) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    days.iter().map(|d| value(d)).sum::<f64>() / days.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(index: u32, composite_score: f64, completion_rate: f64) -> DayAggregate {
        DayAggregate {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(index as u64),
            mood: 3,
            energy: 3,
            stress: 3,
            sleep: 3,
            composite_score,
            completed_habits: 0,
            total_habits: 0,
            completion_rate,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_patterns() {
        let patterns = detect_patterns(&[]);
        assert!(patterns.high_performance_days.is_empty());
        assert!(patterns.low_performance_days.is_empty());
        assert!(!patterns.trends.improving_mood);
        assert!(!patterns.trends.improving_habits);
    }

    #[test]
    fn test_top_and_bottom_thirds() {
        let days: Vec<DayAggregate> = (0..9)
            .map(|i| day(i, 3.0, (i as f64 + 1.0) * 10.0))
            .collect();

        let patterns = detect_patterns(&days);
        assert_eq!(patterns.high_performance_days.len(), 3);
        assert_eq!(patterns.low_performance_days.len(), 3);
        assert_eq!(patterns.high_performance_days[0].completion_rate, 90.0);
        assert_eq!(patterns.low_performance_days[2].completion_rate, 10.0);
    }

    #[test]
    fn test_ties_keep_date_order() {
        let days = vec![day(0, 3.0, 50.0), day(1, 3.0, 50.0), day(2, 3.0, 50.0)];
        let patterns = detect_patterns(&days);
        assert_eq!(patterns.high_performance_days.len(), 1);
        assert_eq!(patterns.high_performance_days[0].date, days[0].date);
    }

    #[test]
    fn test_improving_second_half_sets_flags() {
        let days: Vec<DayAggregate> = (0..10)
            .map(|i| {
                if i < 5 {
                    day(i, 2.0, 20.0)
                } else {
                    day(i, 4.0, 80.0)
                }
            })
            .collect();

        let patterns = detect_patterns(&days);
        assert!(patterns.trends.improving_mood);
        assert!(patterns.trends.improving_habits);
    }

    #[test]
    fn test_declining_second_half_clears_flags() {
        let days: Vec<DayAggregate> = (0..10)
            .map(|i| {
                if i < 5 {
                    day(i, 4.5, 90.0)
                } else {
                    day(i, 2.0, 10.0)
                }
            })
            .collect();

        let patterns = detect_patterns(&days);
        assert!(!patterns.trends.improving_mood);
        assert!(!patterns.trends.improving_habits);
    }

    #[test]
    fn test_momentum_resilient_to_unsorted_input() {
        let mut days: Vec<DayAggregate> = (0..10)
            .map(|i| {
                if i < 5 {
                    day(i, 2.0, 20.0)
                } else {
                    day(i, 4.0, 80.0)
                }
            })
            .collect();
        days.reverse();

        let patterns = detect_patterns(&days);
        assert!(patterns.trends.improving_mood);
        assert!(patterns.trends.improving_habits);
    }
}
