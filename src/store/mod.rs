// ABOUTME: Versioned record store abstraction over append-only workout logs
// ABOUTME: Exposes append and compare-and-append set supersession, never update or delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Versioned Record Store
//!
//! Stores never mutate or hard-delete. An edit is a new set version linked to
//! the one it replaces; a deletion is a tombstone. Reads fold the log into
//! [`Workout`] values in which every inactive record is still present and
//! flagged `is_deleted`, so calculators see exactly what a snapshot would.
//!
//! Writers are serialized per store. [`RecordStore::supersede_set`] is
//! compare-and-append: once a version has a successor, any further attempt to
//! supersede it fails with `ErrorCode::VersionConflict`.

mod ledger;
mod memory;
mod record;
#[cfg(feature = "sqlite")]
mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;

pub use ledger::Ledger;
pub use memory::InMemoryRecordStore;
pub use record::{
    CompletionRecord, ExerciseRecord, Record, RecordKind, Tombstone, WorkoutRecord,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRecordStore;

/// Append-only store of workout records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one immutable record
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists`, `ResourceNotFound` or `VersionConflict`
    /// when the record conflicts with the log, or `StorageError` when the
    /// backend fails.
    async fn append(&self, record: Record) -> AppResult<()>;

    /// Append a batch of records atomically
    ///
    /// Records are validated in order, so later ones may reference earlier
    /// ones. Either every record lands in the log or none does.
    ///
    /// # Errors
    ///
    /// Returns the first record's conflict as [`RecordStore::append`] would,
    /// with the log left exactly as it was.
    async fn append_batch(&self, records: Vec<Record>) -> AppResult<()>;

    /// Replace the current version of a set with `next`
    ///
    /// `next` is linked back to `previous_id` and appended only while
    /// `previous_id` is still the current, non-deleted version.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` when `previous_id` was already superseded or
    /// deleted, and `InvalidInput` when `next` links to a different version.
    async fn supersede_set(&self, previous_id: Uuid, mut next: SetRecord) -> AppResult<()> {
        match next.previous_version_id {
            Some(linked) if linked != previous_id => {
                return Err(AppError::invalid_input(format!(
                    "set {} links to {linked}, not {previous_id}",
                    next.id
                )));
            }
            _ => next.previous_version_id = Some(previous_id),
        }
        self.append(Record::Set(next)).await
    }

    /// Materialized workout by id, including soft-deleted records
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    async fn workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>>;

    /// Every materialized workout ascending by start
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    async fn workouts(&self, include_deleted: bool) -> AppResult<Vec<Workout>>;

    /// Version chain of the logical set containing `set_id`, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown set.
    async fn set_history(&self, set_id: Uuid) -> AppResult<Vec<SetRecord>>;

    /// Snapshots of one workout in append order
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    async fn snapshots(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutSnapshot>>;

    /// Most recent snapshot of one workout
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    async fn latest_snapshot(&self, workout_id: Uuid) -> AppResult<Option<WorkoutSnapshot>>;

    /// Number of records in the log
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    async fn record_count(&self) -> AppResult<usize>;
}
