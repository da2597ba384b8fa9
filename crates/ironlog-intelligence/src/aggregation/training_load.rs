// ABOUTME: Weekly training-load classification against a trailing baseline
// ABOUTME: Light/moderate/heavy classes and a piecewise-linear 0-100 gauge position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::weekly::{WeeklyAggregator, WeeklyRollup};
use crate::calendar::weeks_before;
use crate::config::intelligence::TrainingLoadConfig;
use crate::constants::training_load::{
    GAUGE_HEAVY_CEILING, GAUGE_HEAVY_START, GAUGE_LIGHT_FLOOR, GAUGE_MODERATE_START,
    GAUGE_RATIO_SCALE,
};
use crate::models::Workout;

/// Load class of the current week relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadClass {
    /// Ratio below the light boundary (0.8)
    Light,
    /// Ratio between the boundaries, both inclusive
    Moderate,
    /// Ratio above the heavy boundary (1.2)
    Heavy,
}

/// Current-week load assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingLoadAssessment {
    /// Week being assessed
    pub week_start: NaiveDate,
    /// Volume of that week
    pub current_volume_kg: f64,
    /// Mean weekly volume of the baseline window
    pub baseline_volume_kg: f64,
    /// `current / baseline`, 1.0 when there is no baseline
    pub ratio: f64,
    /// False when the baseline was empty or zero and `ratio` is a placeholder
    pub baseline_available: bool,
    /// Load class for `ratio`
    pub class: LoadClass,
    /// Gauge position, 0-100
    pub gauge: f64,
    /// Mean RPE for the week, only with sufficient RPE coverage
    pub average_rpe: Option<f64>,
    /// Hard sets for the week, only with sufficient RPE coverage
    pub hard_sets: Option<usize>,
    /// Fatigue index for the week, only with sufficient RPE coverage
    pub fatigue_index: Option<f64>,
}

/// Classifies weekly volume against a trailing average
#[derive(Debug, Clone)]
pub struct TrainingLoadClassifier {
    light_upper_ratio: f64,
    heavy_lower_ratio: f64,
    trailing_weeks: usize,
    include_current_week: bool,
}

impl Default for TrainingLoadClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingLoadClassifier {
    /// Create a classifier with default boundaries
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&TrainingLoadConfig::default())
    }

    /// Create a classifier from configuration
    #[must_use]
    pub const fn from_config(config: &TrainingLoadConfig) -> Self {
        Self {
            light_upper_ratio: config.light_upper_ratio,
            heavy_lower_ratio: config.heavy_lower_ratio,
            trailing_weeks: config.trailing_weeks,
            include_current_week: config.include_current_week,
        }
    }

    /// Classify a load ratio; both boundaries belong to `Moderate`
    #[must_use]
    pub fn classify(&self, ratio: f64) -> LoadClass {
        if ratio < self.light_upper_ratio {
            LoadClass::Light
        } else if ratio > self.heavy_lower_ratio {
            LoadClass::Heavy
        } else {
            LoadClass::Moderate
        }
    }

    /// Map a load ratio onto the 0-100 gauge
    ///
    /// Light weeks sit in 10-40, moderate weeks interpolate 40-60 across the
    /// moderate band, heavy weeks climb from 60 and cap at 95.
    #[must_use]
    pub fn gauge_position(&self, ratio: f64) -> f64 {
        match self.classify(ratio) {
            LoadClass::Light => {
                (ratio * GAUGE_RATIO_SCALE).clamp(GAUGE_LIGHT_FLOOR, GAUGE_MODERATE_START)
            }
            LoadClass::Moderate => {
                let band = self.heavy_lower_ratio - self.light_upper_ratio;
                let progress = (ratio - self.light_upper_ratio) / band;
                progress.mul_add(GAUGE_HEAVY_START - GAUGE_MODERATE_START, GAUGE_MODERATE_START)
            }
            LoadClass::Heavy => (ratio - self.heavy_lower_ratio)
                .mul_add(GAUGE_RATIO_SCALE, GAUGE_HEAVY_START)
                .min(GAUGE_HEAVY_CEILING),
        }
    }

    /// `current / baseline`, or `(1.0, false)` when the baseline is not positive
    #[must_use]
    pub fn load_ratio(current_volume_kg: f64, baseline_volume_kg: f64) -> (f64, bool) {
        if baseline_volume_kg > 0.0 {
            (current_volume_kg / baseline_volume_kg, true)
        } else {
            (1.0, false)
        }
    }

    /// Assess `current_week` against the preceding weeks in `rollups`
    ///
    /// `rollups` should be contiguous (gap weeks present with zero volume);
    /// weeks absent from it are treated as before the training history began
    /// and left out of the baseline.
    #[must_use]
    pub fn assess(&self, rollups: &[WeeklyRollup], current_week: NaiveDate) -> TrainingLoadAssessment {
        let by_week: HashMap<NaiveDate, &WeeklyRollup> =
            rollups.iter().map(|rollup| (rollup.week_start, rollup)).collect();
        let current = by_week
            .get(&current_week)
            .map_or_else(|| WeeklyRollup::empty(current_week), |rollup| (*rollup).clone());

        let first_week = rollups
            .iter()
            .map(|rollup| rollup.week_start)
            .min()
            .unwrap_or(current_week);
        let mut baseline_weeks = Vec::new();
        let mut week = current_week;
        for _ in 0..self.trailing_weeks {
            week = weeks_before(week, 1);
            if week < first_week {
                break;
            }
            if let Some(rollup) = by_week.get(&week) {
                baseline_weeks.push(rollup.volume_kg);
            }
        }
        if self.include_current_week {
            baseline_weeks.push(current.volume_kg);
        }

        let baseline_volume_kg = if baseline_weeks.is_empty() {
            0.0
        } else {
            baseline_weeks.iter().sum::<f64>() / baseline_weeks.len() as f64
        };
        let (ratio, baseline_available) = Self::load_ratio(current.volume_kg, baseline_volume_kg);
        let class = self.classify(ratio);

        debug!(
            week = %current_week,
            current = current.volume_kg,
            baseline = baseline_volume_kg,
            ratio,
            ?class,
            "Classified training load"
        );

        TrainingLoadAssessment {
            week_start: current_week,
            current_volume_kg: current.volume_kg,
            baseline_volume_kg,
            ratio,
            baseline_available,
            class,
            gauge: self.gauge_position(ratio),
            average_rpe: current.average_rpe,
            hard_sets: current.hard_sets,
            fatigue_index: current.fatigue_index,
        }
    }

    /// Assess the week containing `now`
    #[must_use]
    pub fn assess_workouts(
        &self,
        aggregator: &WeeklyAggregator,
        workouts: &[Workout],
        now: DateTime<Utc>,
    ) -> TrainingLoadAssessment {
        let current_week = aggregator.week_of(now);
        let rollups = aggregator.rollup_through(workouts, current_week);
        self.assess(&rollups, current_week)
    }
}
