// ABOUTME: Snapshot ingestion, the single normalization step at the store boundary
// ABOUTME: Migrates a snapshot, decomposes it into immutable records, and appends what is new
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Snapshot Ingestion
//!
//! A snapshot of any supported schema version is migrated, deserialized into
//! canonical types and decomposed into store records:
//!
//! 1. the workout header and exercise instance headers,
//! 2. set versions, each chain ordered so a version follows the one it supersedes,
//! 3. the completion,
//! 4. tombstones for soft-deleted records whose deletion is not explained by
//!    supersession,
//! 5. the snapshot itself.
//!
//! Ingestion is idempotent: records already in the store are skipped, so
//! re-importing a snapshot or importing a later snapshot of the same workout
//! only appends what changed.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;
use crate::store::{
    CompletionRecord, ExerciseRecord, Record, RecordStore, Tombstone, WorkoutRecord,
};

/// Outcome of ingesting one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Workout the snapshot describes
    pub workout_id: Uuid,
    /// Schema version of the document before migration
    pub source_schema_version: String,
    /// Records appended, snapshot included
    pub records_appended: usize,
    /// Records already present in the store
    pub records_skipped: usize,
}

/// Parse, migrate and ingest a snapshot JSON document
///
/// # Errors
///
/// Returns migration and deserialization errors for the document, and store
/// errors for records that conflict with the existing log.
pub async fn ingest_snapshot<S>(store: &S, json: &str) -> AppResult<IngestReport>
where
    S: RecordStore + ?Sized,
{
    let document: Value = serde_json::from_str(json)?;
    ingest_document(store, document).await
}

/// Migrate and ingest an already-parsed snapshot document
///
/// # Errors
///
/// As [`ingest_snapshot`].
pub async fn ingest_document<S>(store: &S, document: Value) -> AppResult<IngestReport>
where
    S: RecordStore + ?Sized,
{
    let source_schema_version = document
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let snapshot = WorkoutSnapshot::from_value(document)?;
    let mut report = ingest(store, snapshot).await?;
    report.source_schema_version = source_schema_version;
    Ok(report)
}

/// Ingest a canonical snapshot
///
/// # Errors
///
/// Returns `InvalidInput` for a snapshot of an in-progress workout and store
/// errors for conflicting records. Nothing is appended when any record is
/// rejected.
pub async fn ingest<S>(store: &S, snapshot: WorkoutSnapshot) -> AppResult<IngestReport>
where
    S: RecordStore + ?Sized,
{
    let existing = store.workout(snapshot.workout_id).await?;
    let known = KnownState::from_workout(existing.as_ref());
    let stored_snapshots = if existing.is_some() {
        store.snapshots(snapshot.workout_id).await?
    } else {
        Vec::new()
    };

    let mut report = IngestReport {
        workout_id: snapshot.workout_id,
        source_schema_version: snapshot.schema_version.clone(),
        records_appended: 0,
        records_skipped: 0,
    };

    let mut pending = Vec::new();
    for record in snapshot_records(&snapshot)? {
        if known.contains(&record) {
            report.records_skipped += 1;
        } else {
            pending.push(record);
        }
    }
    if stored_snapshots.contains(&snapshot) {
        report.records_skipped += 1;
    } else {
        pending.push(Record::Snapshot(Box::new(snapshot)));
    }

    // One batch: a rejected record must not leave a half-ingested workout behind
    report.records_appended = pending.len();
    store.append_batch(pending).await?;

    info!(
        workout_id = %report.workout_id,
        appended = report.records_appended,
        skipped = report.records_skipped,
        "Ingested workout snapshot"
    );
    Ok(report)
}

/// Decompose a snapshot into store records, snapshot excluded
///
/// # Errors
///
/// Returns `InvalidInput` when the snapshot describes an in-progress workout.
pub fn snapshot_records(snapshot: &WorkoutSnapshot) -> AppResult<Vec<Record>> {
    let workout = snapshot.to_workout();
    let Some(completed_at) = workout.completed_at else {
        return Err(AppError::invalid_input(format!(
            "snapshot of workout {} has no completion time",
            workout.id
        ))
        .with_resource_id(workout.id.to_string()));
    };

    let mut records = Vec::new();
    let mut tombstones = Vec::new();

    let mut header = WorkoutRecord::from(&workout);
    header.is_deleted = false;
    header.deleted_at = None;
    records.push(Record::Workout(header));
    if workout.is_deleted {
        tombstones.push(Tombstone {
            record_id: workout.id,
            deleted_at: workout.deleted_at.unwrap_or(snapshot.updated_at),
        });
    }

    for exercise in &workout.exercises {
        let mut header = ExerciseRecord::from(exercise);
        header.is_deleted = false;
        records.push(Record::Exercise(header));
        if exercise.is_deleted {
            tombstones.push(Tombstone {
                record_id: exercise.id,
                deleted_at: snapshot.updated_at,
            });
        }
    }

    for exercise in &workout.exercises {
        let superseded: HashSet<Uuid> = exercise
            .sets
            .iter()
            .filter_map(|set| set.previous_version_id)
            .collect();
        for set in supersession_order(&exercise.sets) {
            let mut version = set.clone();
            version.is_deleted = false;
            if set.is_deleted && !superseded.contains(&set.id) {
                tombstones.push(Tombstone {
                    record_id: set.id,
                    deleted_at: snapshot.updated_at,
                });
            }
            records.push(Record::Set(version));
        }
    }

    records.push(Record::Completion(CompletionRecord {
        workout_id: workout.id,
        completed_at,
    }));
    records.extend(tombstones.into_iter().map(Record::Tombstone));

    debug!(
        workout_id = %workout.id,
        records = records.len(),
        "Decomposed snapshot into records"
    );
    Ok(records)
}

/// Order set versions so each follows the version it supersedes
///
/// Versions whose predecessor is not in `sets` start a chain. Input order is
/// kept among chain starts.
fn supersession_order(sets: &[SetRecord]) -> Vec<&SetRecord> {
    let ids: HashSet<Uuid> = sets.iter().map(|set| set.id).collect();
    let mut ordered: Vec<&SetRecord> = Vec::with_capacity(sets.len());
    let mut placed: HashSet<Uuid> = HashSet::with_capacity(sets.len());

    let starts = sets
        .iter()
        .filter(|set| set.previous_version_id.is_none_or(|previous| !ids.contains(&previous)));
    for start in starts {
        let mut cursor = Some(start);
        while let Some(set) = cursor {
            if !placed.insert(set.id) {
                break;
            }
            ordered.push(set);
            cursor = sets
                .iter()
                .find(|next| next.previous_version_id == Some(set.id));
        }
    }

    // Versions caught in a link cycle have no start; keep them so the store rejects them
    ordered.extend(sets.iter().filter(|set| !placed.contains(&set.id)));
    ordered
}

/// What the store already holds for one workout
#[derive(Default)]
struct KnownState {
    workout: bool,
    completed: bool,
    entities: HashSet<Uuid>,
    deleted: HashSet<Uuid>,
}

impl KnownState {
    fn from_workout(workout: Option<&Workout>) -> Self {
        let Some(workout) = workout else {
            return Self::default();
        };
        let mut state = Self {
            workout: true,
            completed: workout.is_completed(),
            entities: HashSet::from([workout.id]),
            deleted: HashSet::new(),
        };
        if workout.is_deleted {
            state.deleted.insert(workout.id);
        }
        for exercise in &workout.exercises {
            state.entities.insert(exercise.id);
            if exercise.is_deleted {
                state.deleted.insert(exercise.id);
            }
            for set in &exercise.sets {
                state.entities.insert(set.id);
                if set.is_deleted {
                    state.deleted.insert(set.id);
                }
            }
        }
        state
    }

    fn contains(&self, record: &Record) -> bool {
        match record {
            Record::Workout(_) => self.workout,
            Record::Exercise(exercise) => self.entities.contains(&exercise.id),
            Record::Set(set) => self.entities.contains(&set.id),
            Record::Completion(_) => self.completed,
            Record::Tombstone(tombstone) => self.deleted.contains(&tombstone.record_id),
            Record::Snapshot(_) => false,
        }
    }
}
