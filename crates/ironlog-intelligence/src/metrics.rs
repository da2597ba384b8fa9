// ABOUTME: Pure metric calculators over set, exercise and workout records
// ABOUTME: Volume, estimated 1RM, intensity, hard sets, RPE, effort density and fatigue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Set and workout metric calculators
//!
//! Every function here is a pure function of its arguments. Missing inputs
//! (bodyweight sets without a weight, sets without RPE, workouts still in
//! progress) produce a neutral value (`0.0` or `None`) instead of an error, and
//! every ratio guards its denominator.
//!
//! Functions taking a set population accept anything iterable over
//! `&SetRecord`, so a slice, a `Vec` or [`Workout::active_sets`] all work.
//! Soft-deleted sets are always skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::OneRepMaxAlgorithm;
use crate::config::intelligence::{HardSetThresholds, MetricsConfig};
use crate::constants::time::SECONDS_PER_MINUTE;
use crate::models::{SetRecord, Workout};

#[inline]
const fn counts(set: &SetRecord, exclude_warmups: bool) -> bool {
    !set.is_deleted && !(exclude_warmups && set.is_warmup)
}

/// `weight x reps`, or 0 when either is missing or non-positive
#[must_use]
pub fn set_volume(weight_kg: Option<f64>, reps: Option<u32>) -> f64 {
    match (weight_kg, reps) {
        (Some(weight), Some(reps)) if weight > 0.0 && reps > 0 => weight * f64::from(reps),
        _ => 0.0,
    }
}

/// Estimated one-rep max using the selected formula
#[must_use]
pub fn estimated_one_rep_max(
    weight_kg: Option<f64>,
    reps: Option<u32>,
    algorithm: OneRepMaxAlgorithm,
) -> f64 {
    algorithm.estimate(weight_kg, reps)
}

/// Sum of set volume over non-deleted sets
pub fn exercise_volume<'a, I>(sets: I, exclude_warmups: bool) -> f64
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter()
        .filter(|set| counts(set, exclude_warmups))
        .map(|set| set_volume(set.weight_kg, set.reps))
        .sum()
}

/// Heaviest weight over non-deleted sets, 0 when none carry a weight
pub fn max_weight<'a, I>(sets: I, exclude_warmups: bool) -> f64
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter()
        .filter(|set| counts(set, exclude_warmups))
        .filter_map(|set| set.weight_kg)
        .fold(0.0, f64::max)
}

/// Best estimated one-rep max over non-deleted sets, 0 when the population is empty
pub fn best_one_rep_max<'a, I>(sets: I, exclude_warmups: bool, algorithm: OneRepMaxAlgorithm) -> f64
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter()
        .filter(|set| counts(set, exclude_warmups))
        .map(|set| algorithm.estimate(set.weight_kg, set.reps))
        .fold(0.0, f64::max)
}

/// `weight / one_rm`, or 0 when the one-rep max is missing or non-positive
#[must_use]
pub fn relative_intensity(weight_kg: Option<f64>, one_rep_max_kg: Option<f64>) -> f64 {
    match (weight_kg, one_rep_max_kg) {
        (Some(weight), Some(one_rm)) if one_rm > 0.0 && weight > 0.0 => weight / one_rm,
        _ => 0.0,
    }
}

/// Hard-set check with the default thresholds (RPE >= 8 or RIR <= 2)
#[must_use]
pub fn is_hard_set(set: &SetRecord) -> bool {
    is_hard_set_with(set, &HardSetThresholds::default())
}

/// Hard-set check with explicit thresholds
///
/// Either recorded field qualifies on its own. Warmups and deleted sets are
/// never hard.
#[must_use]
pub fn is_hard_set_with(set: &SetRecord, thresholds: &HardSetThresholds) -> bool {
    if !set.is_working() {
        return false;
    }
    set.rpe.is_some_and(|rpe| rpe >= thresholds.min_rpe)
        || set.rir.is_some_and(|rir| rir <= thresholds.max_rir)
}

/// Non-deleted, non-warmup sets
pub fn working_sets<'a, I>(sets: I) -> impl Iterator<Item = &'a SetRecord>
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter().filter(|set| set.is_working())
}

/// Number of hard working sets
pub fn hard_set_count<'a, I>(sets: I, thresholds: &HardSetThresholds) -> usize
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter()
        .filter(|set| is_hard_set_with(set, thresholds))
        .count()
}

/// Mean RPE over working sets that recorded one, `None` when none did
pub fn average_rpe<'a, I>(sets: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    let (sum, count) = working_sets(sets)
        .filter_map(|set| set.rpe)
        .fold((0.0, 0_usize), |(sum, count), rpe| (sum + rpe, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Share of working sets carrying an RPE (0 when there are no working sets)
pub fn rpe_coverage<'a, I>(sets: I) -> f64
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    let (with_rpe, total) = working_sets(sets).fold((0_usize, 0_usize), |(with_rpe, total), set| {
        (with_rpe + usize::from(set.rpe.is_some()), total + 1)
    });
    if total == 0 {
        0.0
    } else {
        with_rpe as f64 / total as f64
    }
}

/// Volume per minute of session, 0 when the duration is missing or non-positive
#[must_use]
pub fn effort_density(volume_kg: f64, duration_seconds: Option<i64>) -> f64 {
    match duration_seconds {
        Some(seconds) if seconds > 0 => volume_kg / (seconds as f64 / SECONDS_PER_MINUTE),
        _ => 0.0,
    }
}

/// `avg_rpe x total_sets`, 0 when no RPE was recorded
#[must_use]
pub fn fatigue_index(average_rpe: Option<f64>, total_sets: usize) -> f64 {
    average_rpe.map_or(0.0, |rpe| rpe * total_sets as f64)
}

/// Total volume of a workout's non-deleted exercises
#[must_use]
pub fn workout_volume(workout: &Workout, exclude_warmups: bool) -> f64 {
    exercise_volume(workout.active_sets(), exclude_warmups)
}

/// Per-workout metric summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Total volume in kilograms
    pub volume_kg: f64,
    /// Non-deleted, non-warmup sets
    pub working_sets: usize,
    /// Hard working sets
    pub hard_sets: usize,
    /// Mean RPE over working sets that recorded one
    pub average_rpe: Option<f64>,
    /// Share of working sets with RPE
    pub rpe_coverage: f64,
    /// Session length, `None` while in progress
    pub duration_seconds: Option<i64>,
    /// Kilograms per minute
    pub effort_density: f64,
    /// `average_rpe x working_sets`
    pub fatigue_index: f64,
}

/// Metrics calculator bound to one configuration
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    /// Formula used for estimated one-rep max
    pub algorithm: OneRepMaxAlgorithm,
    /// Whether warmups are skipped for volume and maxima
    pub exclude_warmups: bool,
    /// Hard-set thresholds
    pub hard_set: HardSetThresholds,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCalculator {
    /// Create a calculator with the default formula and thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&MetricsConfig::default())
    }

    /// Create a calculator from configuration
    #[must_use]
    pub const fn from_config(config: &MetricsConfig) -> Self {
        Self {
            algorithm: config.one_rep_max_algorithm,
            exclude_warmups: config.exclude_warmups,
            hard_set: config.hard_set,
        }
    }

    /// Use a different one-rep-max formula
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: OneRepMaxAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Estimated one-rep max with the configured formula
    #[must_use]
    pub fn estimated_one_rep_max(&self, weight_kg: Option<f64>, reps: Option<u32>) -> f64 {
        self.algorithm.estimate(weight_kg, reps)
    }

    /// Exercise volume with the configured warmup policy
    pub fn exercise_volume<'a, I>(&self, sets: I) -> f64
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        exercise_volume(sets, self.exclude_warmups)
    }

    /// Heaviest weight with the configured warmup policy
    pub fn max_weight<'a, I>(&self, sets: I) -> f64
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        max_weight(sets, self.exclude_warmups)
    }

    /// Best estimated one-rep max with the configured formula and warmup policy
    pub fn best_one_rep_max<'a, I>(&self, sets: I) -> f64
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        best_one_rep_max(sets, self.exclude_warmups, self.algorithm)
    }

    /// Hard-set check with the configured thresholds
    #[must_use]
    pub fn is_hard_set(&self, set: &SetRecord) -> bool {
        is_hard_set_with(set, &self.hard_set)
    }

    /// Summarize one workout
    #[must_use]
    pub fn workout_summary(&self, workout: &Workout) -> WorkoutSummary {
        let volume_kg = exercise_volume(workout.active_sets(), self.exclude_warmups);
        let working = working_sets(workout.active_sets()).count();
        let average = average_rpe(workout.active_sets());
        let duration_seconds = workout.duration_seconds();

        debug!(
            workout_id = %workout.id,
            volume_kg,
            working_sets = working,
            "Computed workout summary"
        );

        WorkoutSummary {
            volume_kg,
            working_sets: working,
            hard_sets: hard_set_count(workout.active_sets(), &self.hard_set),
            average_rpe: average,
            rpe_coverage: rpe_coverage(workout.active_sets()),
            duration_seconds,
            effort_density: effort_density(volume_kg, duration_seconds),
            fatigue_index: fatigue_index(average, working),
        }
    }
}
