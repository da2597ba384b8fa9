// ABOUTME: In-memory fold of the record log with append-time integrity checks
// ABOUTME: Materializes workouts, set version chains, and snapshots from immutable records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record ledger
//!
//! The ledger is the shared core of every store backend. It validates a record
//! against everything appended so far, then folds it in. Nothing in the ledger
//! is ever overwritten: a record counts as deleted when its own flag is set,
//! when a tombstone names it, or (sets only) when a later version supersedes it.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::record::{CompletionRecord, ExerciseRecord, Record, Tombstone, WorkoutRecord};
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseInstance, SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;

/// Folded state of an append-only record log
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    workouts: HashMap<Uuid, WorkoutRecord>,
    exercises: HashMap<Uuid, ExerciseRecord>,
    exercises_by_workout: HashMap<Uuid, Vec<Uuid>>,
    sets: HashMap<Uuid, SetRecord>,
    sets_by_exercise: HashMap<Uuid, Vec<Uuid>>,
    completions: HashMap<Uuid, DateTime<Utc>>,
    tombstones: HashMap<Uuid, DateTime<Utc>>,
    superseded_by: HashMap<Uuid, Uuid>,
    snapshots: HashMap<Uuid, Vec<WorkoutSnapshot>>,
    records: usize,
}

impl Ledger {
    /// Empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records folded in
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records
    }

    /// Whether nothing has been appended
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Whether an entity (workout, exercise instance or set) with this id exists
    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.workouts.contains_key(&id)
            || self.exercises.contains_key(&id)
            || self.sets.contains_key(&id)
    }

    /// Check a record against the current state without applying it
    ///
    /// # Errors
    ///
    /// - `ResourceAlreadyExists` for a duplicate id, completion or tombstone
    /// - `ResourceNotFound` when a referenced parent or record is unknown
    /// - `VersionConflict` when a set revises a version that is no longer current
    /// - `InvalidInput` for internally inconsistent records
    pub fn validate(&self, record: &Record) -> AppResult<()> {
        match record {
            Record::Workout(workout) => self.ensure_new(workout.id, "workout"),
            Record::Exercise(exercise) => self.validate_exercise(exercise),
            Record::Set(set) => self.validate_set(set),
            Record::Completion(completion) => self.validate_completion(completion),
            Record::Tombstone(tombstone) => self.validate_tombstone(tombstone),
            Record::Snapshot(snapshot) => {
                if self.workouts.contains_key(&snapshot.workout_id) {
                    Ok(())
                } else {
                    Err(AppError::not_found(format!("workout {}", snapshot.workout_id)))
                }
            }
        }
    }

    /// Validate and fold in a record
    ///
    /// # Errors
    ///
    /// Returns the validation error; the ledger is unchanged on error.
    pub fn append(&mut self, record: Record) -> AppResult<()> {
        self.validate(&record)?;
        self.apply(record);
        Ok(())
    }

    /// Fold `records` into a copy of this ledger, leaving `self` untouched
    ///
    /// Later records may depend on earlier ones in the same batch.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; nothing is staged on error.
    pub fn staged(&self, records: &[Record]) -> AppResult<Self> {
        let mut scratch = self.clone();
        for record in records {
            scratch.append(record.clone())?;
        }
        Ok(scratch)
    }

    /// Validate and fold in every record of a batch, or none of them
    ///
    /// # Errors
    ///
    /// Returns the first validation error; the ledger is unchanged on error.
    pub fn append_all(&mut self, records: &[Record]) -> AppResult<()> {
        *self = self.staged(records)?;
        Ok(())
    }

    fn ensure_new(&self, id: Uuid, label: &str) -> AppResult<()> {
        if self.contains(id) {
            Err(AppError::already_exists(format!("{label} {id}")).with_resource_id(id.to_string()))
        } else {
            Ok(())
        }
    }

    fn validate_exercise(&self, exercise: &ExerciseRecord) -> AppResult<()> {
        self.ensure_new(exercise.id, "exercise instance")?;
        if !self.workouts.contains_key(&exercise.workout_id) {
            return Err(AppError::not_found(format!("workout {}", exercise.workout_id))
                .with_resource_id(exercise.workout_id.to_string()));
        }
        Ok(())
    }

    fn validate_set(&self, set: &SetRecord) -> AppResult<()> {
        self.ensure_new(set.id, "set")?;
        if !self.exercises.contains_key(&set.exercise_instance_id) {
            return Err(
                AppError::not_found(format!("exercise instance {}", set.exercise_instance_id))
                    .with_resource_id(set.exercise_instance_id.to_string()),
            );
        }
        let Some(previous_id) = set.previous_version_id else {
            return Ok(());
        };

        let previous = self.sets.get(&previous_id).ok_or_else(|| {
            AppError::not_found(format!("set version {previous_id}"))
                .with_resource_id(previous_id.to_string())
        })?;
        if previous.exercise_instance_id != set.exercise_instance_id {
            return Err(AppError::invalid_input(format!(
                "set {} cannot revise set {previous_id} of a different exercise instance",
                set.id
            )));
        }
        if let Some(winner) = self.superseded_by.get(&previous_id) {
            return Err(AppError::version_conflict(format!(
                "set version {previous_id} was already superseded by {winner}"
            ))
            .with_resource_id(previous_id.to_string()));
        }
        if previous.is_deleted || self.tombstones.contains_key(&previous_id) {
            return Err(AppError::version_conflict(format!(
                "set version {previous_id} is deleted and cannot be revised"
            ))
            .with_resource_id(previous_id.to_string()));
        }
        Ok(())
    }

    fn validate_completion(&self, completion: &CompletionRecord) -> AppResult<()> {
        let workout = self.workouts.get(&completion.workout_id).ok_or_else(|| {
            AppError::not_found(format!("workout {}", completion.workout_id))
                .with_resource_id(completion.workout_id.to_string())
        })?;
        if self.completions.contains_key(&completion.workout_id) {
            return Err(AppError::already_exists(format!(
                "completion of workout {}",
                completion.workout_id
            ))
            .with_resource_id(completion.workout_id.to_string()));
        }
        if completion.completed_at < workout.started_at {
            return Err(AppError::invalid_input(format!(
                "workout {} cannot complete before it started",
                completion.workout_id
            )));
        }
        Ok(())
    }

    fn validate_tombstone(&self, tombstone: &Tombstone) -> AppResult<()> {
        if !self.contains(tombstone.record_id) {
            return Err(AppError::not_found(format!("record {}", tombstone.record_id))
                .with_resource_id(tombstone.record_id.to_string()));
        }
        if self.tombstones.contains_key(&tombstone.record_id) {
            return Err(AppError::already_exists(format!(
                "tombstone for record {}",
                tombstone.record_id
            ))
            .with_resource_id(tombstone.record_id.to_string()));
        }
        Ok(())
    }

    fn apply(&mut self, record: Record) {
        match record {
            Record::Workout(workout) => {
                self.workouts.insert(workout.id, workout);
            }
            Record::Exercise(exercise) => {
                self.exercises_by_workout
                    .entry(exercise.workout_id)
                    .or_default()
                    .push(exercise.id);
                self.exercises.insert(exercise.id, exercise);
            }
            Record::Set(set) => {
                if let Some(previous_id) = set.previous_version_id {
                    self.superseded_by.insert(previous_id, set.id);
                }
                self.sets_by_exercise
                    .entry(set.exercise_instance_id)
                    .or_default()
                    .push(set.id);
                self.sets.insert(set.id, set);
            }
            Record::Completion(completion) => {
                self.completions
                    .insert(completion.workout_id, completion.completed_at);
            }
            Record::Tombstone(tombstone) => {
                self.tombstones
                    .insert(tombstone.record_id, tombstone.deleted_at);
            }
            Record::Snapshot(snapshot) => {
                self.snapshots
                    .entry(snapshot.workout_id)
                    .or_default()
                    .push(*snapshot);
            }
        }
        self.records += 1;
    }

    /// Whether a set version has been replaced by a later one
    #[must_use]
    pub fn is_superseded(&self, set_id: Uuid) -> bool {
        self.superseded_by.contains_key(&set_id)
    }

    /// Materialize one workout with every exercise and set version
    ///
    /// Soft-deleted and superseded records are kept and flagged, so the result
    /// is exactly what a canonical snapshot captures.
    #[must_use]
    pub fn workout(&self, id: Uuid) -> Option<Workout> {
        let header = self.workouts.get(&id)?;
        let tombstoned_at = self.tombstones.get(&id).copied();

        let mut exercises: Vec<ExerciseInstance> = self
            .exercises_by_workout
            .get(&id)
            .map(|ids| ids.iter().filter_map(|exercise_id| self.exercise(*exercise_id)).collect())
            .unwrap_or_default();
        exercises.sort_by_key(|exercise| exercise.order);

        Some(Workout {
            id: header.id,
            name: header.name.clone(),
            started_at: header.started_at,
            completed_at: self.completions.get(&id).copied(),
            timezone: header.timezone.clone(),
            template_id: header.template_id,
            context: header.context,
            notes: header.notes.clone(),
            is_deleted: header.is_deleted || tombstoned_at.is_some(),
            deleted_at: header.deleted_at.or(tombstoned_at),
            exercises,
        })
    }

    fn exercise(&self, id: Uuid) -> Option<ExerciseInstance> {
        let header = self.exercises.get(&id)?;
        let mut sets: Vec<SetRecord> = self
            .sets_by_exercise
            .get(&id)
            .map(|ids| ids.iter().filter_map(|set_id| self.materialized_set(*set_id)).collect())
            .unwrap_or_default();
        sets.sort_by_key(|set| set.set_number);

        Some(ExerciseInstance {
            id: header.id,
            workout_id: header.workout_id,
            exercise_ref_id: header.exercise_ref_id,
            definition: header.definition.clone(),
            order: header.order,
            superset_id: header.superset_id,
            notes: header.notes.clone(),
            is_deleted: header.is_deleted || self.tombstones.contains_key(&id),
            sets,
        })
    }

    fn materialized_set(&self, id: Uuid) -> Option<SetRecord> {
        let mut set = self.sets.get(&id)?.clone();
        set.is_deleted = set.is_deleted || self.tombstones.contains_key(&id) || self.is_superseded(id);
        Some(set)
    }

    /// Every materialized workout ascending by start
    #[must_use]
    pub fn workouts(&self, include_deleted: bool) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .keys()
            .filter_map(|id| self.workout(*id))
            .filter(|workout| include_deleted || !workout.is_deleted)
            .collect();
        workouts.sort_by_key(|workout| (workout.started_at, workout.id));
        workouts
    }

    /// Version chain of the logical set containing `set_id`, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no set version has this id.
    pub fn set_history(&self, set_id: Uuid) -> AppResult<Vec<SetRecord>> {
        if !self.sets.contains_key(&set_id) {
            return Err(AppError::not_found(format!("set {set_id}")).with_resource_id(set_id.to_string()));
        }

        let mut root = set_id;
        let mut seen = HashSet::from([set_id]);
        while let Some(previous) = self.sets.get(&root).and_then(|set| set.previous_version_id) {
            if !seen.insert(previous) {
                break;
            }
            root = previous;
        }

        let mut chain = Vec::new();
        let mut cursor = Some(root);
        while let Some(id) = cursor {
            if let Some(set) = self.materialized_set(id) {
                chain.push(set);
            }
            cursor = self.superseded_by.get(&id).copied();
        }
        Ok(chain)
    }

    /// Snapshots of a workout in append order
    #[must_use]
    pub fn snapshots(&self, workout_id: Uuid) -> Vec<WorkoutSnapshot> {
        self.snapshots.get(&workout_id).cloned().unwrap_or_default()
    }

    /// Most recently appended snapshot of a workout
    #[must_use]
    pub fn latest_snapshot(&self, workout_id: Uuid) -> Option<WorkoutSnapshot> {
        self.snapshots
            .get(&workout_id)
            .and_then(|snapshots| snapshots.last())
            .cloned()
    }
}
