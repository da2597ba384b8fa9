// ABOUTME: Consecutive-week adherence streak against a weekly workout target
// ABOUTME: Pro-rates the in-progress week and walks back over full Sunday-start weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::is_aggregated;
use crate::calendar::{days_elapsed_in_week, week_start, weeks_before};
use crate::config::intelligence::StreakConfig;
use crate::constants::time::DAYS_PER_WEEK;
use crate::models::Workout;

/// Outcome of a streak walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    /// Consecutive weeks meeting their threshold
    pub weeks: u32,
    /// Workouts so far in the current week
    pub current_week_count: u32,
    /// Pro-rated expectation for the current week
    pub current_week_expected: u32,
    /// Weekly target used for past weeks
    pub target_per_week: u32,
}

/// Weekly adherence streak calculator
#[derive(Debug, Clone)]
pub struct StreakCalculator {
    target_per_week: u32,
    max_weeks: u32,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreakCalculator {
    /// Create a calculator with the default target (3 per week)
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&StreakConfig::default())
    }

    /// Create a calculator from configuration
    #[must_use]
    pub const fn from_config(config: &StreakConfig) -> Self {
        Self {
            target_per_week: config.target_per_week,
            max_weeks: config.max_weeks,
        }
    }

    /// Use a different weekly target
    #[must_use]
    pub const fn with_target(mut self, target_per_week: u32) -> Self {
        self.target_per_week = target_per_week;
        self
    }

    /// Pro-rated expectation for a week `days_elapsed` days in
    #[must_use]
    pub fn expected_so_far(&self, days_elapsed: u32) -> u32 {
        let days = u64::from(days_elapsed.min(DAYS_PER_WEEK as u32));
        let expected = u64::from(self.target_per_week) * days / DAYS_PER_WEEK as u64;
        u32::try_from(expected).unwrap_or(self.target_per_week)
    }

    /// Walk back from the week containing `now`
    ///
    /// The current week passes when it reaches its pro-rated expectation. A
    /// current week with nothing logged and nothing yet expected neither
    /// extends nor breaks the streak. Past weeks need the full target. The
    /// walk stops at the first failing week, after `max_weeks` weeks, or once
    /// it reaches weeks before the oldest workout.
    #[must_use]
    pub fn calculate(
        &self,
        workout_starts: &[DateTime<Utc>],
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> StreakReport {
        let current_week = week_start(now, offset);
        let current_week_expected = self.expected_so_far(days_elapsed_in_week(now, offset));

        let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
        for start in workout_starts.iter().filter(|start| **start <= now) {
            *counts.entry(week_start(*start, offset)).or_insert(0) += 1;
        }
        let current_week_count = counts.get(&current_week).copied().unwrap_or(0);

        let mut report = StreakReport {
            weeks: 0,
            current_week_count,
            current_week_expected,
            target_per_week: self.target_per_week,
        };
        let Some(oldest_week) = counts.keys().min().copied() else {
            return report;
        };

        let mut week = current_week;
        for index in 0..self.max_weeks {
            if week < oldest_week {
                break;
            }
            let count = counts.get(&week).copied().unwrap_or(0);
            let threshold = if index == 0 {
                current_week_expected
            } else {
                self.target_per_week
            };
            // An empty current week is only neutral while nothing is expected yet
            let neutral = index == 0 && count == 0 && threshold == 0;
            if !neutral {
                if count < threshold {
                    break;
                }
                report.weeks += 1;
            }
            week = weeks_before(week, 1);
        }

        debug!(
            weeks = report.weeks,
            current = current_week_count,
            expected = current_week_expected,
            "Calculated weekly streak"
        );
        report
    }

    /// Streak over completed, non-deleted workouts
    #[must_use]
    pub fn calculate_for_workouts(
        &self,
        workouts: &[Workout],
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> StreakReport {
        let starts: Vec<DateTime<Utc>> = workouts
            .iter()
            .filter(|workout| is_aggregated(workout))
            .map(|workout| workout.started_at)
            .collect();
        self.calculate(&starts, now, offset)
    }
}
