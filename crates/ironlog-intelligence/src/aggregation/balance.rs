// ABOUTME: Muscle-group and movement-pattern volume balance over a trailing window
// ABOUTME: Push/pull and upper/lower ratios via keyword matching plus a 0-100 balance score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Balance aggregation
//!
//! Volume is attributed in full to every primary muscle group of an exercise,
//! so a squat listing quads and glutes counts its volume once for each. The
//! per-muscle totals therefore do not sum to the session volume.
//!
//! Push/pull and upper/lower ratios report `1.0` when the denominator bucket
//! is empty. That value avoids a division by zero and is not a claim that
//! training is balanced; check `push_pull_defined` / `upper_lower_defined`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::is_aggregated;
use crate::calendar::days_before;
use crate::config::intelligence::BalanceConfig;
use crate::constants::time::DAYS_PER_WEEK;
use crate::metrics::exercise_volume;
use crate::models::Workout;

/// Push or pull classification of a movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    /// Pressing / pushing movements
    Push,
    /// Pulling / rowing movements
    Pull,
}

/// Upper or lower body classification of a muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyRegion {
    /// Upper-body muscle
    Upper,
    /// Lower-body muscle
    Lower,
}

/// Volume balance over the trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Inclusive start of the window
    pub window_start: DateTime<Utc>,
    /// End of the window
    pub window_end: DateTime<Utc>,
    /// Volume by lowercased primary muscle group
    pub muscle_group_volume: BTreeMap<String, f64>,
    /// Volume by lowercased movement pattern
    pub movement_pattern_volume: BTreeMap<String, f64>,
    /// Volume of push patterns
    pub push_volume_kg: f64,
    /// Volume of pull patterns
    pub pull_volume_kg: f64,
    /// `push / pull`, 1.0 when pull volume is zero
    pub push_pull_ratio: f64,
    /// Whether `push_pull_ratio` had a non-zero denominator
    pub push_pull_defined: bool,
    /// Volume attributed to upper-body muscles
    pub upper_volume_kg: f64,
    /// Volume attributed to lower-body muscles
    pub lower_volume_kg: f64,
    /// `upper / lower`, 1.0 when lower volume is zero
    pub upper_lower_ratio: f64,
    /// Whether `upper_lower_ratio` had a non-zero denominator
    pub upper_lower_defined: bool,
    /// Balance score across muscle groups
    pub muscle_balance_score: f64,
    /// Balance score across movement patterns
    pub pattern_balance_score: f64,
}

/// Balance score (0-100) for a set of category volumes
///
/// Each category's share of the total is compared with the even share
/// `100 / count`; the score is `max(0, 100 - 2 x mean absolute deviation)`.
/// Empty input or zero total volume scores 0.
pub fn balance_score<I>(volumes: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let volumes: Vec<f64> = volumes.into_iter().collect();
    let total: f64 = volumes.iter().sum();
    if volumes.is_empty() || total <= 0.0 {
        return 0.0;
    }

    let ideal_share = 100.0 / volumes.len() as f64;
    let mean_deviation = volumes
        .iter()
        .map(|volume| (volume / total * 100.0 - ideal_share).abs())
        .sum::<f64>()
        / volumes.len() as f64;

    mean_deviation.mul_add(-2.0, 100.0).max(0.0)
}

fn ratio_or_one(numerator: f64, denominator: f64) -> (f64, bool) {
    if denominator > 0.0 {
        (numerator / denominator, true)
    } else {
        (1.0, false)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Length of the longest entry of `words` found inside `label`
fn longest_match(label: &str, words: &[String]) -> Option<usize> {
    words
        .iter()
        .filter(|word| label.contains(word.as_str()))
        .map(String::len)
        .max()
}

/// Aggregates volume by muscle group and movement pattern
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    window_weeks: i64,
    push_keywords: Vec<String>,
    pull_keywords: Vec<String>,
    upper_body_muscles: Vec<String>,
    lower_body_muscles: Vec<String>,
    exclude_warmups: bool,
}

impl Default for BalanceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceAggregator {
    /// Create an aggregator with the default window and vocabularies
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&BalanceConfig::default(), true)
    }

    /// Create an aggregator from configuration
    #[must_use]
    pub fn from_config(config: &BalanceConfig, exclude_warmups: bool) -> Self {
        let lowered =
            |words: &[String]| -> Vec<String> { words.iter().map(|word| normalize(word)).collect() };
        Self {
            window_weeks: config.window_weeks,
            push_keywords: lowered(&config.push_keywords),
            pull_keywords: lowered(&config.pull_keywords),
            upper_body_muscles: lowered(&config.upper_body_muscles),
            lower_body_muscles: lowered(&config.lower_body_muscles),
            exclude_warmups,
        }
    }

    /// Classify a movement-pattern label; push keywords win ties
    #[must_use]
    pub fn classify_pattern(&self, pattern: &str) -> Option<MovementDirection> {
        let pattern = normalize(pattern);
        if self.push_keywords.iter().any(|word| pattern.contains(word.as_str())) {
            Some(MovementDirection::Push)
        } else if self.pull_keywords.iter().any(|word| pattern.contains(word.as_str())) {
            Some(MovementDirection::Pull)
        } else {
            None
        }
    }

    /// Classify a muscle-group label
    ///
    /// The longest vocabulary entry contained in the label decides, so
    /// "lower back" beats "back". Upper body wins equal-length matches.
    #[must_use]
    pub fn classify_muscle(&self, muscle: &str) -> Option<BodyRegion> {
        let muscle = normalize(muscle);
        let upper = longest_match(&muscle, &self.upper_body_muscles);
        let lower = longest_match(&muscle, &self.lower_body_muscles);
        match (upper, lower) {
            (Some(upper), Some(lower)) if lower > upper => Some(BodyRegion::Lower),
            (Some(_), _) => Some(BodyRegion::Upper),
            (None, Some(_)) => Some(BodyRegion::Lower),
            (None, None) => None,
        }
    }

    /// Analyze completed workouts started within the window ending at `now`
    #[must_use]
    pub fn analyze(&self, workouts: &[Workout], now: DateTime<Utc>) -> BalanceReport {
        let window_start = days_before(now, self.window_weeks.saturating_mul(DAYS_PER_WEEK));
        let mut muscle_group_volume: BTreeMap<String, f64> = BTreeMap::new();
        let mut movement_pattern_volume: BTreeMap<String, f64> = BTreeMap::new();
        let mut push_volume_kg = 0.0;
        let mut pull_volume_kg = 0.0;

        let in_window = workouts.iter().filter(|workout| {
            is_aggregated(workout) && workout.started_at >= window_start && workout.started_at <= now
        });

        for workout in in_window {
            for exercise in workout.active_exercises() {
                let volume = exercise_volume(exercise.active_sets(), self.exclude_warmups);
                if volume <= 0.0 {
                    continue;
                }
                let definition = &exercise.definition;

                for muscle in &definition.primary_muscle_groups {
                    *muscle_group_volume.entry(normalize(muscle)).or_insert(0.0) += volume;
                }
                if let Some(pattern) = &definition.movement_pattern {
                    *movement_pattern_volume.entry(normalize(pattern)).or_insert(0.0) += volume;
                    match self.classify_pattern(pattern) {
                        Some(MovementDirection::Push) => push_volume_kg += volume,
                        Some(MovementDirection::Pull) => pull_volume_kg += volume,
                        None => {}
                    }
                }
            }
        }

        let (upper_volume_kg, lower_volume_kg) =
            muscle_group_volume
                .iter()
                .fold((0.0, 0.0), |(upper, lower), (muscle, volume)| {
                    match self.classify_muscle(muscle) {
                        Some(BodyRegion::Upper) => (upper + volume, lower),
                        Some(BodyRegion::Lower) => (upper, lower + volume),
                        None => (upper, lower),
                    }
                });

        let (push_pull_ratio, push_pull_defined) = ratio_or_one(push_volume_kg, pull_volume_kg);
        let (upper_lower_ratio, upper_lower_defined) =
            ratio_or_one(upper_volume_kg, lower_volume_kg);

        debug!(
            muscles = muscle_group_volume.len(),
            patterns = movement_pattern_volume.len(),
            push_pull_ratio,
            upper_lower_ratio,
            "Computed balance report"
        );

        BalanceReport {
            window_start,
            window_end: now,
            muscle_balance_score: balance_score(muscle_group_volume.values().copied()),
            pattern_balance_score: balance_score(movement_pattern_volume.values().copied()),
            muscle_group_volume,
            movement_pattern_volume,
            push_volume_kg,
            pull_volume_kg,
            push_pull_ratio,
            push_pull_defined,
            upper_volume_kg,
            lower_volume_kg,
            upper_lower_ratio,
            upper_lower_defined,
        }
    }
}
