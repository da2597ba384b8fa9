// ABOUTME: Workout session model with contextual fields and read-time duration
// ABOUTME: Duration is always derived from timestamps and never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExerciseInstance, SetRecord};

/// Context captured when the workout was logged; never recomputed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutContext {
    /// Bodyweight in kilograms
    pub bodyweight_kg: Option<f64>,
    /// Sleep the night before, in hours
    pub sleep_hours: Option<f64>,
    /// Self-reported readiness score
    pub readiness_score: Option<f64>,
}

/// One training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Session start
    pub started_at: DateTime<Utc>,
    /// Session completion, `None` while in progress or abandoned
    pub completed_at: Option<DateTime<Utc>>,
    /// Timezone label recorded by the client (metadata only)
    pub timezone: Option<String>,
    /// Template the session was started from
    pub template_id: Option<Uuid>,
    /// Context captured at logging time
    pub context: WorkoutContext,
    /// Freeform notes
    pub notes: Option<String>,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the workout was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
    /// Exercise instances ordered by position
    pub exercises: Vec<ExerciseInstance>,
}

impl Workout {
    /// Create an in-progress workout with no exercises
    #[must_use]
    pub fn new(name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            started_at,
            completed_at: None,
            timezone: None,
            template_id: None,
            context: WorkoutContext::default(),
            notes: None,
            is_deleted: false,
            deleted_at: None,
            exercises: Vec::new(),
        }
    }

    /// Whether the session has a completion timestamp
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// `completed_at - started_at` in seconds, undefined while in progress
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        self.completed_at
            .map(|completed| (completed - self.started_at).num_seconds())
    }

    /// Exercise instances that are not soft-deleted
    pub fn active_exercises(&self) -> impl Iterator<Item = &ExerciseInstance> {
        self.exercises.iter().filter(|exercise| !exercise.is_deleted)
    }

    /// Every non-deleted set of every non-deleted exercise
    pub fn active_sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.active_exercises()
            .flat_map(ExerciseInstance::active_sets)
    }
}
