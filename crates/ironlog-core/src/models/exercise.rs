// ABOUTME: Exercise instance and denormalized exercise definition models
// ABOUTME: Captures the exercise library entry at logging time so history is immune to later edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SetRecord;

/// Exercise library entry, copied into every instance when it is logged
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Display name ("Barbell Bench Press")
    pub name: String,
    /// Free-text movement pattern label ("horizontal press", "hinge")
    pub movement_pattern: Option<String>,
    /// Primary muscle groups
    #[serde(default)]
    pub primary_muscle_groups: Vec<String>,
    /// Secondary muscle groups
    #[serde(default)]
    pub secondary_muscle_groups: Vec<String>,
    /// Equipment label ("barbell", "dumbbell")
    pub equipment: Option<String>,
}

impl ExerciseDefinition {
    /// Create a definition with only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the movement pattern
    #[must_use]
    pub fn movement_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.movement_pattern = Some(pattern.into());
        self
    }

    /// Adds a primary muscle group
    #[must_use]
    pub fn primary(mut self, muscle: impl Into<String>) -> Self {
        self.primary_muscle_groups.push(muscle.into());
        self
    }

    /// Adds a secondary muscle group
    #[must_use]
    pub fn secondary(mut self, muscle: impl Into<String>) -> Self {
        self.secondary_muscle_groups.push(muscle.into());
        self
    }

    /// Sets the equipment label
    #[must_use]
    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }
}

/// One exercise performed within one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInstance {
    /// Unique identifier
    pub id: Uuid,
    /// Owning workout
    pub workout_id: Uuid,
    /// Reference to the canonical exercise library entry
    pub exercise_ref_id: Uuid,
    /// Definition as it was when the exercise was logged
    pub definition: ExerciseDefinition,
    /// Ordinal position within the workout
    pub order: u32,
    /// Instances sharing a superset id are performed back-to-back
    pub superset_id: Option<Uuid>,
    /// Freeform notes
    pub notes: Option<String>,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// Every set version, including soft-deleted and superseded ones
    pub sets: Vec<SetRecord>,
}

impl ExerciseInstance {
    /// Create an empty instance
    #[must_use]
    pub fn new(
        workout_id: Uuid,
        exercise_ref_id: Uuid,
        definition: ExerciseDefinition,
        order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workout_id,
            exercise_ref_id,
            definition,
            order,
            superset_id: None,
            notes: None,
            is_deleted: false,
            sets: Vec::new(),
        }
    }

    /// Sets that count toward calculations (the instance itself must be active)
    pub fn active_sets(&self) -> impl Iterator<Item = &SetRecord> {
        let instance_active = !self.is_deleted;
        self.sets
            .iter()
            .filter(move |set| instance_active && set.is_active())
    }

    /// Whether this instance belongs to a superset group
    #[must_use]
    pub const fn is_superset(&self) -> bool {
        self.superset_id.is_some()
    }
}
