// ABOUTME: Short-window progression trend detection over per-workout exercise series
// ABOUTME: Least-squares slope on values normalized by the window's first point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progression detection
//!
//! The detector looks at the most recent `window_size` points only. It is a
//! local trend, not a full-history regression, and it is recomputed from raw
//! data on every call.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::is_aggregated;
use crate::algorithms::OneRepMaxAlgorithm;
use crate::config::intelligence::ProgressionConfig;
use crate::metrics::{best_one_rep_max, exercise_volume, max_weight, working_sets};
use crate::models::{SetRecord, Workout};

/// One point of an exercise series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    /// When the value was achieved
    pub date: DateTime<Utc>,
    /// Metric value
    pub value: f64,
}

impl ProgressionPoint {
    /// Create a point
    #[must_use]
    pub const fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }
}

/// Trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Normalized slope above the threshold
    Positive,
    /// Slope within the threshold band
    Plateau,
    /// Normalized slope below the negative threshold
    Regression,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Plateau => write!(f, "plateau"),
            Self::Regression => write!(f, "regression"),
        }
    }
}

/// Result of a trend fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Classified trend
    pub trend: Trend,
    /// Least-squares slope per point, in units of the first window value
    pub normalized_slope: f64,
    /// Points that were fitted
    pub window: Vec<ProgressionPoint>,
}

/// Metric an exercise series is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMetric {
    /// Best estimated one-rep max of the session
    #[default]
    BestOneRepMax,
    /// Heaviest weight of the session
    MaxWeight,
    /// Working volume of the session
    Volume,
}

/// Trend detector over a trailing window
#[derive(Debug, Clone)]
pub struct ProgressionDetector {
    window_size: usize,
    threshold: f64,
}

impl Default for ProgressionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionDetector {
    /// Create a detector with the default window (4) and threshold (0.5%)
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ProgressionConfig::default())
    }

    /// Create a detector from configuration
    #[must_use]
    pub const fn from_config(config: &ProgressionConfig) -> Self {
        Self {
            window_size: config.window_size,
            threshold: config.significance_threshold,
        }
    }

    /// Classify the trend of an ascending series
    ///
    /// Returns `None` ("no signal") when there are fewer than `window_size`
    /// points or the window's first value is not positive.
    #[must_use]
    pub fn detect(&self, series: &[ProgressionPoint]) -> Option<TrendAnalysis> {
        if self.window_size < 2 || series.len() < self.window_size {
            return None;
        }
        let window = &series[series.len() - self.window_size..];
        let first = window.first()?.value;
        if first <= 0.0 {
            return None;
        }

        let normalized: Vec<f64> = window.iter().map(|point| point.value / first).collect();
        let normalized_slope = least_squares_slope(&normalized)?;

        let trend = if normalized_slope > self.threshold {
            Trend::Positive
        } else if normalized_slope < -self.threshold {
            Trend::Regression
        } else {
            Trend::Plateau
        };

        Some(TrendAnalysis {
            trend,
            normalized_slope,
            window: window.to_vec(),
        })
    }
}

/// Slope of `values` against their index
fn least_squares_slope(values: &[f64]) -> Option<f64> {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (covariance, variance) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(covariance, variance), (index, value)| {
            let dx = index as f64 - mean_x;
            (dx.mul_add(value - mean_y, covariance), dx.mul_add(dx, variance))
        });

    (variance.abs() > f64::EPSILON).then(|| covariance / variance)
}

/// Per-workout series for one exercise, ascending by workout start
///
/// Every completed, non-deleted workout containing the exercise contributes
/// one point computed over all its active instances of that exercise.
/// Sessions without working sets for the exercise are skipped.
#[must_use]
pub fn exercise_series(
    workouts: &[Workout],
    exercise_ref_id: Uuid,
    metric: SeriesMetric,
    algorithm: OneRepMaxAlgorithm,
) -> Vec<ProgressionPoint> {
    let mut sessions: Vec<&Workout> = workouts.iter().filter(|w| is_aggregated(w)).collect();
    sessions.sort_by_key(|workout| workout.started_at);

    sessions
        .into_iter()
        .filter_map(|workout| {
            let sets: Vec<&SetRecord> = workout
                .active_exercises()
                .filter(|exercise| exercise.exercise_ref_id == exercise_ref_id)
                .flat_map(|exercise| exercise.active_sets())
                .collect();
            if working_sets(sets.iter().copied()).next().is_none() {
                return None;
            }
            let value = match metric {
                SeriesMetric::BestOneRepMax => best_one_rep_max(sets.iter().copied(), true, algorithm),
                SeriesMetric::MaxWeight => max_weight(sets.iter().copied(), true),
                SeriesMetric::Volume => exercise_volume(sets.iter().copied(), true),
            };
            Some(ProgressionPoint::new(workout.started_at, value))
        })
        .collect()
}
