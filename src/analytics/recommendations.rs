use crate::analytics::correlations::CorrelationCoefficients;
use crate::analytics::optimal_range::OptimalRangeAnalysis;
use crate::analytics::patterns::PerformancePatterns;
use crate::analytics::trends::{Trend, TrendSummary};

/// Hard cap on the number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Correlations at or below this magnitude are not worth mentioning.
const NOTABLE_CORRELATION: f64 = 0.3;

/// Above this magnitude a correlation is called "strong" instead of
/// "moderate".
const STRONG_CORRELATION: f64 = 0.5;

/// A stress coefficient above this is missing the expected protective
/// (negative) direction.
const STRESS_PROTECTIVE_CEILING: f64 = -0.2;

/// Everything the rules are allowed to look at.
pub struct RecommendationInputs<'a> {
    pub correlations: &'a CorrelationCoefficients,
    pub trends: &'a TrendSummary,
    pub patterns: &'a PerformancePatterns,
    pub ranges: &'a OptimalRangeAnalysis,
}

type Rule = fn(&RecommendationInputs) -> Option<String>;

/// Fixed priority order. Output is truncated to [`MAX_RECOMMENDATIONS`], so
/// earlier rules win when many fire at once.
const RULES: &[Rule] = &[
    strongest_correlation,
    stress_management,
    energy_scheduling,
    sleep_consistency,
    reduce_complexity,
    positive_reinforcement,
    best_day_snapshot,
    high_mood_scheduling,
];

/// Evaluate every rule in priority order, cap at five messages, and fall
/// back to generic guidance when nothing fires. Never returns an empty list.
pub fn generate_recommendations(inputs: &RecommendationInputs) -> Vec<String> {
    let mut messages: Vec<String> = RULES
        .iter()
        .filter_map(|rule| rule(inputs))
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if messages.is_empty() {
        messages.push(
            "Keep logging your mood and habits daily. Patterns usually take a couple of weeks \
             of consistent data to emerge."
                .to_string(),
        );
        messages.push(
            "No strong mood-habit patterns yet. Steady tracking is the fastest way to find out \
             what actually works for you."
                .to_string(),
        );
    }

    messages
}

fn ranked_dimensions(c: &CorrelationCoefficients) -> [(&'static str, f64); 4] {
    let mut dims = [
        ("mood", c.mood),
        ("energy", c.energy),
        ("stress", c.stress),
        ("sleep", c.sleep),
    ];
    dims.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    dims
}

fn strongest_correlation(inputs: &RecommendationInputs) -> Option<String> {
    let (dimension, r) = ranked_dimensions(inputs.correlations)[0];
    if r.abs() <= NOTABLE_CORRELATION {
        return None;
    }

    let strength = if r.abs() > STRONG_CORRELATION {
        "strong"
    } else {
        "moderate"
    };
    let direction = if r > 0.0 { "higher" } else { "lower" };
    Some(format!(
        "There is a {strength} link between {dimension} and your habit completion: days with \
         {direction} {dimension} tend to go better (r = {r:.2})."
    ))
}

fn stress_management(inputs: &RecommendationInputs) -> Option<String> {
    // Expected pattern is a clearly negative coefficient; anything above the
    // ceiling means stress is not playing its usual protective role.
    if inputs.correlations.stress > STRESS_PROTECTIVE_CEILING {
        Some(
            "Stress is not showing its usual dampening pattern in your data. A short \
             stress-management practice, such as a breathing exercise or a walk before your \
             habits, may be worth trying."
                .to_string(),
        )
    } else {
        None
    }
}

fn energy_scheduling(inputs: &RecommendationInputs) -> Option<String> {
    if inputs.correlations.energy > NOTABLE_CORRELATION {
        Some(
            "Your energy level tracks habit success closely. Schedule demanding habits for the \
             part of the day when your energy peaks."
                .to_string(),
        )
    } else {
        None
    }
}

fn sleep_consistency(inputs: &RecommendationInputs) -> Option<String> {
    if inputs.correlations.sleep > NOTABLE_CORRELATION {
        Some(
            "Better sleep lines up with better habit completion for you. A consistent sleep \
             schedule is likely to protect your streaks."
                .to_string(),
        )
    } else {
        None
    }
}

fn reduce_complexity(inputs: &RecommendationInputs) -> Option<String> {
    if inputs.trends.completion_rate == Trend::Declining && inputs.trends.mood == Trend::Declining
    {
        Some(
            "Both your mood and your completion rate have been trending down. Consider pausing \
             or simplifying some habits until momentum returns."
                .to_string(),
        )
    } else {
        None
    }
}

fn positive_reinforcement(inputs: &RecommendationInputs) -> Option<String> {
    // Stress classifies on the inverted series, so Improving means stress is
    // actually easing.
    if inputs.trends.stress == Trend::Improving
        && inputs.trends.completion_rate == Trend::Improving
    {
        Some(
            "Your stress is easing while habit completion climbs. Whatever you changed \
             recently is working, so keep it up."
                .to_string(),
        )
    } else {
        None
    }
}

fn best_day_snapshot(inputs: &RecommendationInputs) -> Option<String> {
    let best = &inputs.patterns.high_performance_days;
    if best.is_empty() {
        return None;
    }
    let avg_composite =
        best.iter().map(|d| d.composite_score).sum::<f64>() / best.len() as f64;
    Some(format!(
        "On your best days your overall wellbeing score averages {avg_composite:.1}/5. Protect \
         the conditions that produce days like those."
    ))
}

fn high_mood_scheduling(inputs: &RecommendationInputs) -> Option<String> {
    let range = inputs.ranges.optimal_mood_range.mood;
    if range.midpoint() >= 4.0 {
        Some(format!(
            "You complete the most habits when your mood sits around {}-{}. Front-load your \
             hardest habits on days that start well.",
            range.min(),
            range.max()
        ))
    } else {
        None
    }
}
