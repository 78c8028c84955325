//! Mood–habit correlation and pattern analysis.
//!
//! Given a user's daily mood samples (mood, energy, stress, sleep, each 1-5)
//! and their habit completion records, [`analyze`] computes Pearson
//! correlations between subjective state and completion rate, detects
//! performance patterns and trends, identifies the mood ranges associated
//! with the best days, and synthesizes a capped list of recommendations.
//!
//! The engine is a pure function of its inputs: no I/O, no persistence, no
//! shared state. It is safe to call concurrently for different users or date
//! ranges. Degenerate statistics (zero variance, sparse data, empty
//! partitions) resolve to documented fallbacks; the only failure mode is
//! [`InsightError::NoData`] when the requested range contains no mood samples.

pub mod analytics;
pub mod domain;
pub mod error;

pub use analytics::aggregate::DayAggregate;
pub use analytics::correlations::CorrelationCoefficients;
pub use analytics::optimal_range::{DimensionRange, OptimalMoodRange};
pub use analytics::trends::{Trend, TrendSummary};
pub use analytics::{analyze, AnalysisResult};
pub use domain::models::{CompletionRecord, MoodSample};
pub use error::InsightError;
