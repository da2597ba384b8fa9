// ABOUTME: Record envelope appended to the versioned store
// ABOUTME: Six immutable record kinds folded into materialized workouts on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ExerciseDefinition, ExerciseInstance, SetRecord, Workout, WorkoutContext};
use crate::snapshot::WorkoutSnapshot;

/// Workout header, without exercises or completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Workout identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Session start
    pub started_at: DateTime<Utc>,
    /// Timezone label (metadata only)
    pub timezone: Option<String>,
    /// Template the session was started from
    pub template_id: Option<Uuid>,
    /// Context captured at logging time
    #[serde(default)]
    pub context: WorkoutContext,
    /// Freeform notes
    pub notes: Option<String>,
    /// Soft-delete flag at write time
    #[serde(default)]
    pub is_deleted: bool,
    /// Soft-delete time at write time
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id,
            name: workout.name.clone(),
            started_at: workout.started_at,
            timezone: workout.timezone.clone(),
            template_id: workout.template_id,
            context: workout.context,
            notes: workout.notes.clone(),
            is_deleted: workout.is_deleted,
            deleted_at: workout.deleted_at,
        }
    }
}

/// Exercise instance header, without sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Instance identifier
    pub id: Uuid,
    /// Owning workout
    pub workout_id: Uuid,
    /// Canonical exercise reference
    pub exercise_ref_id: Uuid,
    /// Definition captured at logging time
    pub definition: ExerciseDefinition,
    /// Position within the workout
    pub order: u32,
    /// Superset group
    pub superset_id: Option<Uuid>,
    /// Freeform notes
    pub notes: Option<String>,
    /// Soft-delete flag at write time
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&ExerciseInstance> for ExerciseRecord {
    fn from(exercise: &ExerciseInstance) -> Self {
        Self {
            id: exercise.id,
            workout_id: exercise.workout_id,
            exercise_ref_id: exercise.exercise_ref_id,
            definition: exercise.definition.clone(),
            order: exercise.order,
            superset_id: exercise.superset_id,
            notes: exercise.notes.clone(),
            is_deleted: exercise.is_deleted,
        }
    }
}

/// Write-once completion of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Completed workout
    pub workout_id: Uuid,
    /// Completion time
    pub completed_at: DateTime<Utc>,
}

/// Soft delete of a workout, exercise instance or set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tombstone {
    /// Record being deleted
    pub record_id: Uuid,
    /// Deletion time
    pub deleted_at: DateTime<Utc>,
}

/// One entry of the append-only log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Record {
    /// Workout header
    Workout(WorkoutRecord),
    /// Exercise instance header
    Exercise(ExerciseRecord),
    /// Set version
    Set(SetRecord),
    /// Workout completion
    Completion(CompletionRecord),
    /// Soft delete
    Tombstone(Tombstone),
    /// Canonical snapshot of a completed workout
    Snapshot(Box<WorkoutSnapshot>),
}

/// Discriminant of a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Workout header
    Workout,
    /// Exercise instance header
    Exercise,
    /// Set version
    Set,
    /// Workout completion
    Completion,
    /// Soft delete
    Tombstone,
    /// Canonical snapshot
    Snapshot,
}

impl RecordKind {
    /// Label stored alongside the payload
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Exercise => "exercise",
            Self::Set => "set",
            Self::Completion => "completion",
            Self::Tombstone => "tombstone",
            Self::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Record {
    /// Kind of this record
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Workout(_) => RecordKind::Workout,
            Self::Exercise(_) => RecordKind::Exercise,
            Self::Set(_) => RecordKind::Set,
            Self::Completion(_) => RecordKind::Completion,
            Self::Tombstone(_) => RecordKind::Tombstone,
            Self::Snapshot(_) => RecordKind::Snapshot,
        }
    }

    /// Key that may appear at most once in the log
    ///
    /// Entity ids share one namespace. Completions and tombstones are keyed by
    /// the record they refer to. Snapshots accumulate and have no key.
    #[must_use]
    pub fn unique_key(&self) -> Option<String> {
        match self {
            Self::Workout(workout) => Some(workout.id.to_string()),
            Self::Exercise(exercise) => Some(exercise.id.to_string()),
            Self::Set(set) => Some(set.id.to_string()),
            Self::Completion(completion) => Some(format!("completion:{}", completion.workout_id)),
            Self::Tombstone(tombstone) => Some(format!("tombstone:{}", tombstone.record_id)),
            Self::Snapshot(_) => None,
        }
    }

    /// Workout the record ultimately belongs to, when it names one directly
    #[must_use]
    pub fn workout_id(&self) -> Option<Uuid> {
        match self {
            Self::Workout(workout) => Some(workout.id),
            Self::Exercise(exercise) => Some(exercise.workout_id),
            Self::Completion(completion) => Some(completion.workout_id),
            Self::Snapshot(snapshot) => Some(snapshot.workout_id),
            Self::Set(_) | Self::Tombstone(_) => None,
        }
    }
}
