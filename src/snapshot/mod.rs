// ABOUTME: Canonical, versioned JSON snapshot of one completed workout session
// ABOUTME: Self-contained recovery format from which every derived metric can be recomputed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Canonical Workout Snapshots
//!
//! A snapshot is written once per completion event and never edited; later
//! changes to the workout produce a new snapshot and readers take the most
//! recent one. Snapshots carry denormalized exercise definitions and every set
//! version, soft-deleted ones included, so [`WorkoutSnapshot::to_workout`]
//! reconstructs the exact input the calculators saw.
//!
//! Documents written by older builds are brought forward by the
//! [`migration`] chain before they are deserialized.

pub mod migration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::constants::schema::CURRENT_SCHEMA_VERSION;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseDefinition, ExerciseInstance, SetRecord, Workout, WorkoutContext};

pub use migration::{MigrationChain, SnapshotMigration};

/// Session-level fields of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Workout name
    pub name: String,
    /// Session start
    pub started_at: DateTime<Utc>,
    /// Session completion
    pub completed_at: Option<DateTime<Utc>>,
    /// Timezone label recorded by the client
    pub timezone: Option<String>,
    /// Bodyweight in kilograms
    pub bodyweight_kg: Option<f64>,
    /// Sleep the night before, in hours
    pub sleep_hours: Option<f64>,
    /// Self-reported readiness
    pub readiness_score: Option<f64>,
    /// Freeform notes
    pub notes: Option<String>,
    /// Template the session was started from
    pub template_id: Option<Uuid>,
    /// Soft-delete flag
    #[serde(default)]
    pub is_deleted: bool,
    /// Soft-delete time
    pub deleted_at: Option<DateTime<Utc>>,
}

/// One set version inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSet {
    /// Set version id
    pub set_id: Uuid,
    /// Position within the exercise
    pub set_number: u32,
    /// Load in kilograms
    pub weight_kg: Option<f64>,
    /// Repetitions
    pub reps: Option<u32>,
    /// Rate of perceived exertion
    pub rpe: Option<f64>,
    /// Reps in reserve
    pub rir: Option<u8>,
    /// Rest after the set
    pub rest_seconds: Option<u32>,
    /// Tempo descriptor
    pub tempo: Option<String>,
    /// Warmup flag
    #[serde(default)]
    pub is_warmup: bool,
    /// Failure flag
    #[serde(default)]
    pub is_failure: bool,
    /// Drop-set flag
    #[serde(default)]
    pub is_dropset: bool,
    /// Soft-delete flag (superseded versions included)
    #[serde(default)]
    pub is_deleted: bool,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
    /// Version this one supersedes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_version_id: Option<Uuid>,
}

/// One exercise instance inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotExercise {
    /// Instance id
    pub exercise_id: Uuid,
    /// Canonical exercise reference
    pub exercise_ref_id: Uuid,
    /// Position within the workout
    pub order: u32,
    /// Superset group
    pub superset_id: Option<Uuid>,
    /// Freeform notes
    pub notes: Option<String>,
    /// Soft-delete flag
    #[serde(default)]
    pub is_deleted: bool,
    /// Definition captured at logging time
    pub exercise_definition: ExerciseDefinition,
    /// Every set version
    pub sets: Vec<SnapshotSet>,
}

/// Canonical workout snapshot document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
    /// Semver of the document layout
    pub schema_version: String,
    /// Workout id
    pub workout_id: Uuid,
    /// When the snapshot was written
    pub created_at: DateTime<Utc>,
    /// Latest change captured in the snapshot
    pub updated_at: DateTime<Utc>,
    /// Session-level fields
    pub metadata: SnapshotMetadata,
    /// Exercise instances by position
    pub exercises: Vec<SnapshotExercise>,
}

impl From<&SetRecord> for SnapshotSet {
    fn from(set: &SetRecord) -> Self {
        Self {
            set_id: set.id,
            set_number: set.set_number,
            weight_kg: set.weight_kg,
            reps: set.reps,
            rpe: set.rpe,
            rir: set.rir,
            rest_seconds: set.rest_seconds,
            tempo: set.tempo.clone(),
            is_warmup: set.is_warmup,
            is_failure: set.is_failure,
            is_dropset: set.is_dropset,
            is_deleted: set.is_deleted,
            completed_at: set.completed_at,
            previous_version_id: set.previous_version_id,
        }
    }
}

impl SnapshotSet {
    fn to_set(&self, exercise_instance_id: Uuid) -> SetRecord {
        SetRecord {
            id: self.set_id,
            exercise_instance_id,
            set_number: self.set_number,
            weight_kg: self.weight_kg,
            reps: self.reps,
            rpe: self.rpe,
            rir: self.rir,
            rest_seconds: self.rest_seconds,
            tempo: self.tempo.clone(),
            is_warmup: self.is_warmup,
            is_failure: self.is_failure,
            is_dropset: self.is_dropset,
            is_deleted: self.is_deleted,
            completed_at: self.completed_at,
            previous_version_id: self.previous_version_id,
        }
    }
}

impl From<&ExerciseInstance> for SnapshotExercise {
    fn from(exercise: &ExerciseInstance) -> Self {
        Self {
            exercise_id: exercise.id,
            exercise_ref_id: exercise.exercise_ref_id,
            order: exercise.order,
            superset_id: exercise.superset_id,
            notes: exercise.notes.clone(),
            is_deleted: exercise.is_deleted,
            exercise_definition: exercise.definition.clone(),
            sets: exercise.sets.iter().map(SnapshotSet::from).collect(),
        }
    }
}

impl SnapshotExercise {
    fn to_instance(&self, workout_id: Uuid) -> ExerciseInstance {
        ExerciseInstance {
            id: self.exercise_id,
            workout_id,
            exercise_ref_id: self.exercise_ref_id,
            definition: self.exercise_definition.clone(),
            order: self.order,
            superset_id: self.superset_id,
            notes: self.notes.clone(),
            is_deleted: self.is_deleted,
            sets: self
                .sets
                .iter()
                .map(|set| set.to_set(self.exercise_id))
                .collect(),
        }
    }
}

impl WorkoutSnapshot {
    /// Snapshot a completed workout
    ///
    /// `updated_at` is the latest timestamp found in the workout itself
    /// (completion, deletion or any set completion).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the workout has not been completed.
    pub fn build(workout: &Workout, created_at: DateTime<Utc>) -> AppResult<Self> {
        let Some(completed_at) = workout.completed_at else {
            return Err(AppError::invalid_input(format!(
                "workout {} is still in progress and cannot be snapshotted",
                workout.id
            ))
            .with_resource_id(workout.id.to_string()));
        };

        let updated_at = workout
            .exercises
            .iter()
            .flat_map(|exercise| exercise.sets.iter().filter_map(|set| set.completed_at))
            .chain(workout.deleted_at)
            .fold(completed_at, |latest, at| latest.max(at));

        let mut exercises: Vec<SnapshotExercise> =
            workout.exercises.iter().map(SnapshotExercise::from).collect();
        exercises.sort_by_key(|exercise| exercise.order);

        debug!(
            workout_id = %workout.id,
            exercises = exercises.len(),
            "Built workout snapshot"
        );

        Ok(Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_owned(),
            workout_id: workout.id,
            created_at,
            updated_at,
            metadata: SnapshotMetadata {
                name: workout.name.clone(),
                started_at: workout.started_at,
                completed_at: Some(completed_at),
                timezone: workout.timezone.clone(),
                bodyweight_kg: workout.context.bodyweight_kg,
                sleep_hours: workout.context.sleep_hours,
                readiness_score: workout.context.readiness_score,
                notes: workout.notes.clone(),
                template_id: workout.template_id,
                is_deleted: workout.is_deleted,
                deleted_at: workout.deleted_at,
            },
            exercises,
        })
    }

    /// Rebuild the workout exactly as it was snapshotted
    #[must_use]
    pub fn to_workout(&self) -> Workout {
        let metadata = &self.metadata;
        Workout {
            id: self.workout_id,
            name: metadata.name.clone(),
            started_at: metadata.started_at,
            completed_at: metadata.completed_at,
            timezone: metadata.timezone.clone(),
            template_id: metadata.template_id,
            context: WorkoutContext {
                bodyweight_kg: metadata.bodyweight_kg,
                sleep_hours: metadata.sleep_hours,
                readiness_score: metadata.readiness_score,
            },
            notes: metadata.notes.clone(),
            is_deleted: metadata.is_deleted,
            deleted_at: metadata.deleted_at,
            exercises: self
                .exercises
                .iter()
                .map(|exercise| exercise.to_instance(self.workout_id))
                .collect(),
        }
    }

    /// Serialize to the canonical JSON value
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if serialization fails.
    pub fn to_value(&self) -> AppResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a document of any supported schema version
    ///
    /// The document is migrated to the current version first.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedSchemaVersion` when no migration path exists,
    /// `MigrationFailed` when a step cannot transform the document, and
    /// `SerializationError` when the migrated document is not a valid snapshot.
    pub fn from_value(document: Value) -> AppResult<Self> {
        let migrated = MigrationChain::standard().migrate(document)?;
        Ok(serde_json::from_value(migrated)?)
    }

    /// Parse a JSON string of any supported schema version
    ///
    /// # Errors
    ///
    /// As [`WorkoutSnapshot::from_value`], plus `SerializationError` for invalid JSON.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(document)
    }
}
