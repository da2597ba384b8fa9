// ABOUTME: Aggregators rolling calculator outputs across weeks and categories
// ABOUTME: Weekly rollups, training-load classification, and muscle/pattern balance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Only completed, non-deleted workouts are aggregated. Abandoned sessions
//! (no completion timestamp) stay in the record log and in snapshots but do
//! not count toward weekly totals, load or balance.

/// Muscle-group and movement-pattern balance
pub mod balance;
/// Weekly load ratio classification and gauge
pub mod training_load;
/// Sunday-start weekly rollups
pub mod weekly;

pub use balance::{balance_score, BalanceAggregator, BalanceReport, BodyRegion, MovementDirection};
pub use training_load::{LoadClass, TrainingLoadAssessment, TrainingLoadClassifier};
pub use weekly::{WeeklyAggregator, WeeklyRollup};

use crate::models::Workout;

/// Whether a workout participates in aggregates
#[must_use]
pub const fn is_aggregated(workout: &Workout) -> bool {
    !workout.is_deleted && workout.completed_at.is_some()
}
