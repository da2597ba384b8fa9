// ABOUTME: Core workout record models for the Ironlog engine
// ABOUTME: Re-exports Workout, ExerciseInstance, ExerciseDefinition and SetRecord
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Materialized views of the append-only record log. A [`Workout`] owns its
//! [`ExerciseInstance`]s, which own every version of their [`SetRecord`]s.
//! Soft-deleted and superseded records stay in the tree with `is_deleted` set
//! so that snapshots remain a complete audit copy; calculators filter them out.

mod exercise;
mod set;
mod workout;

pub use exercise::{ExerciseDefinition, ExerciseInstance};
pub use set::{SetRecord, SetRecordBuilder};
pub use workout::{Workout, WorkoutContext};
