// ABOUTME: Weekly rollup of workout volume, working sets, and RPE-derived effort metrics
// ABOUTME: Groups completed workouts into Sunday-start local weeks with gap weeks filled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::is_aggregated;
use crate::calendar::week_start;
use crate::config::intelligence::{HardSetThresholds, IntelligenceConfig};
use crate::constants::time::DAYS_PER_WEEK;
use crate::constants::training_load::MIN_RPE_COVERAGE;
use crate::metrics::{exercise_volume, hard_set_count, working_sets};
use crate::models::Workout;

/// One calendar week of training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRollup {
    /// Sunday starting the week, in local time
    pub week_start: NaiveDate,
    /// Completed workouts started this week
    pub workout_count: usize,
    /// Working-set volume in kilograms
    pub volume_kg: f64,
    /// Non-deleted, non-warmup sets
    pub working_sets: usize,
    /// Share of working sets carrying RPE
    pub rpe_coverage: f64,
    /// Mean RPE, only when coverage clears the minimum
    pub average_rpe: Option<f64>,
    /// Hard working sets, only when coverage clears the minimum
    pub hard_sets: Option<usize>,
    /// `average_rpe x working_sets`, only when coverage clears the minimum
    pub fatigue_index: Option<f64>,
}

impl WeeklyRollup {
    /// A week with no training
    #[must_use]
    pub const fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            workout_count: 0,
            volume_kg: 0.0,
            working_sets: 0,
            rpe_coverage: 0.0,
            average_rpe: None,
            hard_sets: None,
            fatigue_index: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct WeekTotals {
    workouts: usize,
    volume_kg: f64,
    working_sets: usize,
    rpe_sum: f64,
    rpe_count: usize,
    hard_sets: usize,
}

impl WeekTotals {
    fn merge(&mut self, other: &Self) {
        self.workouts += other.workouts;
        self.volume_kg += other.volume_kg;
        self.working_sets += other.working_sets;
        self.rpe_sum += other.rpe_sum;
        self.rpe_count += other.rpe_count;
        self.hard_sets += other.hard_sets;
    }
}

/// Groups workouts into local calendar weeks
#[derive(Debug, Clone)]
pub struct WeeklyAggregator {
    offset: FixedOffset,
    exclude_warmups: bool,
    min_rpe_coverage: f64,
    hard_set: HardSetThresholds,
}

impl WeeklyAggregator {
    /// Create an aggregator with default thresholds for the given local offset
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            exclude_warmups: true,
            min_rpe_coverage: MIN_RPE_COVERAGE,
            hard_set: HardSetThresholds::default(),
        }
    }

    /// Create an aggregator from configuration
    #[must_use]
    pub const fn from_config(config: &IntelligenceConfig, offset: FixedOffset) -> Self {
        Self {
            offset,
            exclude_warmups: config.metrics.exclude_warmups,
            min_rpe_coverage: config.training_load.min_rpe_coverage,
            hard_set: config.metrics.hard_set,
        }
    }

    /// Local offset used for week boundaries
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Week containing the given instant
    #[must_use]
    pub fn week_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        week_start(instant, self.offset)
    }

    /// Contiguous weekly rollups from the first to the last trained week
    ///
    /// Weeks without workouts in between are present with zero totals.
    #[must_use]
    pub fn rollup(&self, workouts: &[Workout]) -> Vec<WeeklyRollup> {
        let totals = self.accumulate(workouts);
        let (Some(first), Some(last)) = (
            totals.keys().next().copied(),
            totals.keys().next_back().copied(),
        ) else {
            return Vec::new();
        };
        Self::fill(&totals, first, last, self.min_rpe_coverage)
    }

    /// Contiguous weekly rollups from the first trained week through `through_week`
    ///
    /// Used when the current week matters even if nothing was logged in it yet.
    #[must_use]
    pub fn rollup_through(&self, workouts: &[Workout], through_week: NaiveDate) -> Vec<WeeklyRollup> {
        let totals = self.accumulate(workouts);
        let first = totals
            .keys()
            .next()
            .copied()
            .map_or(through_week, |first| first.min(through_week));
        Self::fill(&totals, first, through_week, self.min_rpe_coverage)
    }

    fn accumulate(&self, workouts: &[Workout]) -> BTreeMap<NaiveDate, WeekTotals> {
        let per_workout: Vec<(NaiveDate, WeekTotals)> = workouts
            .par_iter()
            .filter(|workout| is_aggregated(workout))
            .map(|workout| (self.week_of(workout.started_at), self.workout_totals(workout)))
            .collect();

        let mut weeks: BTreeMap<NaiveDate, WeekTotals> = BTreeMap::new();
        for (week, totals) in &per_workout {
            weeks.entry(*week).or_default().merge(totals);
        }

        debug!(
            workouts = per_workout.len(),
            weeks = weeks.len(),
            "Accumulated weekly totals"
        );
        weeks
    }

    fn workout_totals(&self, workout: &Workout) -> WeekTotals {
        let (rpe_sum, rpe_count) = working_sets(workout.active_sets())
            .filter_map(|set| set.rpe)
            .fold((0.0, 0_usize), |(sum, count), rpe| (sum + rpe, count + 1));

        WeekTotals {
            workouts: 1,
            volume_kg: exercise_volume(workout.active_sets(), self.exclude_warmups),
            working_sets: working_sets(workout.active_sets()).count(),
            rpe_sum,
            rpe_count,
            hard_sets: hard_set_count(workout.active_sets(), &self.hard_set),
        }
    }

    fn fill(
        totals: &BTreeMap<NaiveDate, WeekTotals>,
        first: NaiveDate,
        last: NaiveDate,
        min_rpe_coverage: f64,
    ) -> Vec<WeeklyRollup> {
        let mut rollups = Vec::new();
        let mut week = first;
        while week <= last {
            let rollup = totals.get(&week).map_or_else(
                || WeeklyRollup::empty(week),
                |week_totals| Self::finish(week, week_totals, min_rpe_coverage),
            );
            rollups.push(rollup);
            week += Duration::days(DAYS_PER_WEEK);
        }
        rollups
    }

    fn finish(week: NaiveDate, totals: &WeekTotals, min_rpe_coverage: f64) -> WeeklyRollup {
        let rpe_coverage = if totals.working_sets == 0 {
            0.0
        } else {
            totals.rpe_count as f64 / totals.working_sets as f64
        };
        let covered = totals.rpe_count > 0 && rpe_coverage >= min_rpe_coverage;
        let average_rpe = covered.then(|| totals.rpe_sum / totals.rpe_count as f64);

        WeeklyRollup {
            week_start: week,
            workout_count: totals.workouts,
            volume_kg: totals.volume_kg,
            working_sets: totals.working_sets,
            rpe_coverage,
            average_rpe,
            hard_sets: covered.then_some(totals.hard_sets),
            fatigue_index: average_rpe.map(|rpe| rpe * totals.working_sets as f64),
        }
    }
}
