use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::{CompletionRecord, MoodSample};

/// One mood sample joined with that date's habit completions. Produced only
/// for dates that have a mood sample; days with completions but no check-in
/// are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub mood: i32,
    pub energy: i32,
    pub stress: i32,
    pub sleep: i32,
    pub composite_score: f64,
    pub completed_habits: usize,
    pub total_habits: usize,
    /// Percentage in [0, 100]; 0 when no habits were tracked that day.
    pub completion_rate: f64,
}

/// Join mood samples with completion records by date, keeping only samples
/// inside the inclusive `[start, end]` range. Output is sorted ascending by
/// date.
///
/// When a date has no completion records at all, `active_habit_count` stands
/// in as the denominator, so an unlogged day with active habits reads as 0%
/// rather than being skipped.
pub fn build_day_aggregates(
    mood_samples: &[MoodSample],
    completion_records: &[CompletionRecord],
    active_habit_count: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DayAggregate> {
    let mut records_by_date: HashMap<NaiveDate, Vec<&CompletionRecord>> = HashMap::new();
    for record in completion_records {
        records_by_date.entry(record.date).or_default().push(record);
    }

    let mut aggregates: Vec<DayAggregate> = mood_samples
        .iter()
        .filter(|sample| sample.date >= start && sample.date <= end)
        .map(|sample| {
            let records = records_by_date
                .get(&sample.date)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let completed_habits = records.iter().filter(|r| r.completed).count();
            let total_habits = if records.is_empty() {
                active_habit_count
            } else {
                records.len()
            };
            let completion_rate = if total_habits == 0 {
                0.0
            } else {
                (completed_habits as f64 / total_habits as f64 * 100.0).clamp(0.0, 100.0)
            };

            DayAggregate {
                date: sample.date,
                mood: sample.mood,
                energy: sample.energy,
                stress: sample.stress,
                sleep: sample.sleep,
                composite_score: sample.composite_score(),
                completed_habits,
                total_habits,
                completion_rate,
            }
        })
        .collect();

    aggregates.sort_by_key(|a| a.date);
    aggregates
}
