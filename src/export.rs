// ABOUTME: Analytics export document assembled from materialized workouts
// ABOUTME: Summary, weekly time series, per-exercise analytics, balance, and canonical snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analytics Export
//!
//! The export is a read-only view: it is rebuilt from raw records on every
//! call and never written back to the store. Per-exercise analytics are
//! independent of each other and computed in parallel.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::schema::CURRENT_SCHEMA_VERSION;
use crate::errors::AppResult;
use crate::intelligence::aggregation::is_aggregated;
use crate::intelligence::metrics::{best_one_rep_max, exercise_volume, max_weight, working_sets};
use crate::intelligence::{
    exercise_series, BalanceAggregator, BalanceReport, IntelligenceConfig,
    PersonalRecordDetector, PrEvent, ProgressionDetector, ProgressionPoint, SeriesMetric,
    StreakCalculator, StreakReport, TrainingLoadAssessment, TrainingLoadClassifier, TrendAnalysis,
    WeeklyAggregator, WeeklyRollup,
};
use crate::models::{ExerciseInstance, SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;

/// First and last workout start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest start
    pub start: DateTime<Utc>,
    /// Latest start
    pub end: DateTime<Utc>,
}

/// Whole-history totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Completed, non-deleted workouts
    pub total_workouts: usize,
    /// Working sets across those workouts
    pub total_working_sets: usize,
    /// Working volume across those workouts
    pub total_volume_kg: f64,
    /// Span of workout starts, absent without workouts
    pub date_range: Option<DateRange>,
    /// Mean session duration
    pub avg_duration_seconds: Option<f64>,
    /// Workouts per calendar week between the first and last trained week
    pub avg_workouts_per_week: f64,
}

/// Analytics for one canonical exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAnalytics {
    /// Canonical exercise reference
    pub exercise_ref_id: Uuid,
    /// Name from the most recent workout containing the exercise
    pub name: String,
    /// Workouts containing the exercise
    pub frequency: usize,
    /// Working sets logged
    pub total_working_sets: usize,
    /// Working volume
    pub total_volume_kg: f64,
    /// Heaviest working set
    pub max_weight_kg: f64,
    /// Best estimated one-rep max
    pub best_one_rep_max_kg: f64,
    /// Per-workout best estimated one-rep max
    pub progression: Vec<ProgressionPoint>,
    /// Trend over the trailing window, absent without enough points
    pub trend: Option<TrendAnalysis>,
    /// Every personal record in chronological order
    pub pr_history: Vec<PrEvent>,
}

/// Complete analytics export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsExport {
    /// When the export was generated
    pub generated_at: DateTime<Utc>,
    /// Schema version of the embedded snapshots
    pub schema_version: String,
    /// Whole-history totals
    pub summary: ExportSummary,
    /// Contiguous weekly rollups
    pub time_series: Vec<WeeklyRollup>,
    /// Per-exercise analytics, most frequent first
    pub exercise_analytics: Vec<ExerciseAnalytics>,
    /// Muscle and movement balance over the trailing window
    pub balance: BalanceReport,
    /// Load of the current week against its baseline
    pub training_load: TrainingLoadAssessment,
    /// Weekly adherence streak
    pub streak: StreakReport,
    /// Canonical snapshots of every exported workout
    pub workouts: Vec<WorkoutSnapshot>,
}

/// Builds [`AnalyticsExport`] documents
#[derive(Debug, Clone)]
pub struct AnalyticsExporter {
    config: IntelligenceConfig,
    offset: FixedOffset,
}

impl AnalyticsExporter {
    /// Exporter using `config` and local weeks at `offset`
    #[must_use]
    pub const fn new(config: IntelligenceConfig, offset: FixedOffset) -> Self {
        Self { config, offset }
    }

    /// Build the export for `workouts` as of `now`
    ///
    /// In-progress and deleted workouts are left out of every section.
    ///
    /// # Errors
    ///
    /// Returns an error if a workout cannot be snapshotted.
    pub fn export(&self, workouts: &[Workout], now: DateTime<Utc>) -> AppResult<AnalyticsExport> {
        let mut included: Vec<Workout> = workouts
            .iter()
            .filter(|workout| is_aggregated(workout))
            .cloned()
            .collect();
        included.sort_by_key(|workout| workout.started_at);

        let weekly = WeeklyAggregator::from_config(&self.config, self.offset);
        let time_series = weekly.rollup(&included);
        let summary = self.summary(&included, time_series.len());
        let exercise_analytics = self.exercise_analytics(&included);

        let balance = BalanceAggregator::from_config(
            &self.config.balance,
            self.config.metrics.exclude_warmups,
        )
        .analyze(&included, now);
        let training_load = TrainingLoadClassifier::from_config(&self.config.training_load)
            .assess_workouts(&weekly, &included, now);
        let streak = StreakCalculator::from_config(&self.config.streak)
            .calculate_for_workouts(&included, now, self.offset);

        let snapshots = included
            .iter()
            .map(|workout| WorkoutSnapshot::build(workout, now))
            .collect::<AppResult<Vec<_>>>()?;

        info!(
            workouts = summary.total_workouts,
            exercises = exercise_analytics.len(),
            weeks = time_series.len(),
            "Built analytics export"
        );

        Ok(AnalyticsExport {
            generated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION.to_owned(),
            summary,
            time_series,
            exercise_analytics,
            balance,
            training_load,
            streak,
            workouts: snapshots,
        })
    }

    fn summary(&self, workouts: &[Workout], weeks: usize) -> ExportSummary {
        let exclude_warmups = self.config.metrics.exclude_warmups;
        let total_working_sets = workouts
            .iter()
            .map(|workout| working_sets(workout.active_sets()).count())
            .sum();
        let total_volume_kg = workouts
            .iter()
            .map(|workout| exercise_volume(workout.active_sets(), exclude_warmups))
            .sum();

        let date_range = workouts
            .iter()
            .map(|workout| workout.started_at)
            .min()
            .zip(workouts.iter().map(|workout| workout.started_at).max())
            .map(|(start, end)| DateRange { start, end });

        let durations: Vec<i64> = workouts.iter().filter_map(Workout::duration_seconds).collect();
        let avg_duration_seconds = (!durations.is_empty())
            .then(|| durations.iter().sum::<i64>() as f64 / durations.len() as f64);

        let avg_workouts_per_week = if weeks == 0 {
            0.0
        } else {
            workouts.len() as f64 / weeks as f64
        };

        ExportSummary {
            total_workouts: workouts.len(),
            total_working_sets,
            total_volume_kg,
            date_range,
            avg_duration_seconds,
            avg_workouts_per_week,
        }
    }

    fn exercise_analytics(&self, workouts: &[Workout]) -> Vec<ExerciseAnalytics> {
        // Workouts arrive sorted, so later entries carry the most recent name
        let mut by_exercise: BTreeMap<Uuid, Vec<(&Workout, &ExerciseInstance)>> = BTreeMap::new();
        for workout in workouts {
            for exercise in workout.active_exercises() {
                by_exercise
                    .entry(exercise.exercise_ref_id)
                    .or_default()
                    .push((workout, exercise));
            }
        }

        let mut analytics: Vec<ExerciseAnalytics> = by_exercise
            .par_iter()
            .map(|(exercise_ref_id, instances)| {
                self.analyze_exercise(workouts, *exercise_ref_id, instances)
            })
            .collect();
        analytics.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.name.cmp(&b.name)));

        debug!(exercises = analytics.len(), "Computed exercise analytics");
        analytics
    }

    fn analyze_exercise(
        &self,
        workouts: &[Workout],
        exercise_ref_id: Uuid,
        instances: &[(&Workout, &ExerciseInstance)],
    ) -> ExerciseAnalytics {
        let metrics = &self.config.metrics;
        let algorithm = metrics.one_rep_max_algorithm;
        let sets: Vec<&SetRecord> = instances
            .iter()
            .flat_map(|(_, exercise)| exercise.active_sets())
            .collect();

        let mut sessions: Vec<Uuid> = instances.iter().map(|(workout, _)| workout.id).collect();
        sessions.dedup();

        let name = instances
            .last()
            .map(|(_, exercise)| exercise.definition.name.clone())
            .unwrap_or_default();

        let progression =
            exercise_series(workouts, exercise_ref_id, SeriesMetric::BestOneRepMax, algorithm);
        let trend = ProgressionDetector::from_config(&self.config.progression).detect(&progression);

        let detector =
            PersonalRecordDetector::from_config(&self.config.personal_records, algorithm);
        let pr_history = detector.record_history(instances.iter().flat_map(|(workout, exercise)| {
            exercise
                .active_sets()
                .map(|set| (set.completed_at.unwrap_or(workout.started_at), set))
        }));

        ExerciseAnalytics {
            exercise_ref_id,
            name,
            frequency: sessions.len(),
            total_working_sets: working_sets(sets.iter().copied()).count(),
            total_volume_kg: exercise_volume(sets.iter().copied(), metrics.exclude_warmups),
            max_weight_kg: max_weight(sets.iter().copied(), metrics.exclude_warmups),
            best_one_rep_max_kg: best_one_rep_max(
                sets.iter().copied(),
                metrics.exclude_warmups,
                algorithm,
            ),
            progression,
            trend,
            pr_history,
        }
    }
}
