// ABOUTME: Integration tests for the append-only record store backends
// ABOUTME: Runs the same scenarios against the in-memory and SQLite stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use ironlog::errors::ErrorCode;
use ironlog::models::{SetRecordBuilder, Workout};
use ironlog::store::{
    CompletionRecord, ExerciseRecord, InMemoryRecordStore, Record, RecordStore,
    SqliteRecordStore, Tombstone, WorkoutRecord,
};
use tempfile::TempDir;
use uuid::Uuid;

use common::{add_exercise, at, bench_press, completed_workout};

/// Workout with one bench exercise of two sets
fn bench_session() -> Workout {
    let mut workout = completed_workout("Bench", at(2024, 3, 12, 18));
    add_exercise(
        &mut workout,
        Uuid::new_v4(),
        bench_press(),
        &[(80.0, 8), (85.0, 6)],
    );
    workout
}

/// Append every record of a workout in dependency order
async fn append_workout<S: RecordStore>(store: &S, workout: &Workout) {
    store
        .append(Record::Workout(WorkoutRecord::from(workout)))
        .await
        .unwrap();
    for exercise in &workout.exercises {
        store
            .append(Record::Exercise(ExerciseRecord::from(exercise)))
            .await
            .unwrap();
        for set in &exercise.sets {
            store.append(Record::Set(set.clone())).await.unwrap();
        }
    }
    if let Some(completed_at) = workout.completed_at {
        store
            .append(Record::Completion(CompletionRecord {
                workout_id: workout.id,
                completed_at,
            }))
            .await
            .unwrap();
    }
}

async fn sqlite_store(dir: &TempDir) -> SqliteRecordStore {
    let url = format!("sqlite:{}", dir.path().join("ironlog.db").display());
    SqliteRecordStore::open(&url).await.unwrap()
}

// === Scenarios ===

async fn append_and_materialize<S: RecordStore>(store: &S) {
    let workout = bench_session();
    append_workout(store, &workout).await;

    assert_eq!(store.record_count().await.unwrap(), 5);
    let stored = store.workout(workout.id).await.unwrap().unwrap();
    assert_eq!(stored, workout);
    assert_eq!(store.workouts(false).await.unwrap().len(), 1);
    assert!(store.workout(Uuid::new_v4()).await.unwrap().is_none());
}

async fn rejects_orphans_and_duplicates<S: RecordStore>(store: &S) {
    let workout = bench_session();
    append_workout(store, &workout).await;

    let orphan_set = SetRecordBuilder::new(Uuid::new_v4(), 1)
        .weight_kg(60.0)
        .reps(5)
        .build();
    let error = store.append(Record::Set(orphan_set)).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let mut orphan_exercise = ExerciseRecord::from(&workout.exercises[0]);
    orphan_exercise.id = Uuid::new_v4();
    orphan_exercise.workout_id = Uuid::new_v4();
    let error = store
        .append(Record::Exercise(orphan_exercise))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = store
        .append(Record::Workout(WorkoutRecord::from(&workout)))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    let error = store
        .append(Record::Set(workout.exercises[0].sets[0].clone()))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    // Rejected appends leave the log untouched
    assert_eq!(store.record_count().await.unwrap(), 5);
}

async fn supersedes_sets<S: RecordStore>(store: &S) {
    let workout = bench_session();
    append_workout(store, &workout).await;
    let original = workout.exercises[0].sets[1].clone();

    let corrected = original.revise().weight_kg(87.5).build();
    store
        .supersede_set(original.id, corrected.clone())
        .await
        .unwrap();

    let stored = store.workout(workout.id).await.unwrap().unwrap();
    let sets = &stored.exercises[0].sets;
    assert_eq!(sets.len(), 3);
    let active: Vec<_> = stored.active_sets().map(|set| set.id).collect();
    assert_eq!(active, vec![workout.exercises[0].sets[0].id, corrected.id]);

    let history = store.set_history(original.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, original.id);
    assert!(history[0].is_deleted);
    assert_eq!(history[1].id, corrected.id);
    assert_eq!(history[1].weight_kg, Some(87.5));
    assert_eq!(store.set_history(corrected.id).await.unwrap(), history);

    // A second edit of the old version loses
    let stale = original.revise().weight_kg(90.0).build();
    let error = store.supersede_set(original.id, stale).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::VersionConflict);

    // A deleted version cannot be revised either
    store
        .append(Record::Tombstone(Tombstone {
            record_id: corrected.id,
            deleted_at: at(2024, 3, 12, 20),
        }))
        .await
        .unwrap();
    let revived = corrected.revise().build();
    let error = store.supersede_set(corrected.id, revived).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::VersionConflict);

    let error = store.set_history(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

async fn validates_completion<S: RecordStore>(store: &S) {
    let mut workout = bench_session();
    workout.completed_at = None;
    append_workout(store, &workout).await;

    let early = CompletionRecord {
        workout_id: workout.id,
        completed_at: workout.started_at - Duration::minutes(1),
    };
    let error = store.append(Record::Completion(early)).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let completion = CompletionRecord {
        workout_id: workout.id,
        completed_at: workout.started_at + Duration::minutes(50),
    };
    store.append(Record::Completion(completion)).await.unwrap();
    let error = store.append(Record::Completion(completion)).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    let stored = store.workout(workout.id).await.unwrap().unwrap();
    assert_eq!(stored.duration_seconds(), Some(3000));
}

async fn appends_batches_atomically<S: RecordStore>(store: &S) {
    let workout = bench_session();
    let exercise = &workout.exercises[0];
    let mut batch = vec![
        Record::Workout(WorkoutRecord::from(&workout)),
        Record::Exercise(ExerciseRecord::from(exercise)),
    ];
    batch.extend(exercise.sets.iter().cloned().map(Record::Set));

    // The trailing orphan rejects the whole batch
    let mut rejected = batch.clone();
    rejected.push(Record::Set(
        SetRecordBuilder::new(Uuid::new_v4(), 1).weight_kg(60.0).reps(5).build(),
    ));
    let error = store.append_batch(rejected).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(store.record_count().await.unwrap(), 0);
    assert!(store.workout(workout.id).await.unwrap().is_none());

    store.append_batch(batch).await.unwrap();
    store.append_batch(Vec::new()).await.unwrap();
    assert_eq!(store.record_count().await.unwrap(), 4);
    assert_eq!(store.workout(workout.id).await.unwrap().unwrap().active_sets().count(), 2);
}

async fn tombstones_workouts<S: RecordStore>(store: &S) {
    let kept = bench_session();
    let mut removed = bench_session();
    removed.started_at = at(2024, 3, 14, 18);
    removed.completed_at = Some(at(2024, 3, 14, 19));
    append_workout(store, &kept).await;
    append_workout(store, &removed).await;

    store
        .append(Record::Tombstone(Tombstone {
            record_id: removed.id,
            deleted_at: at(2024, 3, 15, 8),
        }))
        .await
        .unwrap();

    let visible = store.workouts(false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, kept.id);

    let all = store.workouts(true).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[1].is_deleted);
    assert_eq!(all[1].deleted_at, Some(at(2024, 3, 15, 8)));
}

// === In-Memory Backend ===

#[tokio::test]
async fn test_memory_append_and_materialize() {
    append_and_materialize(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_rejects_orphans_and_duplicates() {
    rejects_orphans_and_duplicates(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_supersedes_sets() {
    supersedes_sets(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_validates_completion() {
    validates_completion(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_appends_batches_atomically() {
    appends_batches_atomically(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_tombstones_workouts() {
    tombstones_workouts(&InMemoryRecordStore::new()).await;
}

#[tokio::test]
async fn test_memory_concurrent_supersede_has_one_winner() {
    let store = InMemoryRecordStore::new();
    let workout = bench_session();
    append_workout(&store, &workout).await;
    let original = workout.exercises[0].sets[0].clone();
    let original_id = original.id;

    let handles: Vec<_> = (0..8_u32)
        .map(|attempt| {
            let store = store.clone();
            let next = original.revise().weight_kg(81.0 + f64::from(attempt)).build();
            tokio::spawn(async move { store.supersede_set(original_id, next).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(error) => assert_eq!(error.code, ErrorCode::VersionConflict),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(store.set_history(original.id).await.unwrap().len(), 2);
}

// === SQLite Backend ===

#[tokio::test]
async fn test_sqlite_append_and_materialize() {
    let dir = TempDir::new().unwrap();
    append_and_materialize(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_rejects_orphans_and_duplicates() {
    let dir = TempDir::new().unwrap();
    rejects_orphans_and_duplicates(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_supersedes_sets() {
    let dir = TempDir::new().unwrap();
    supersedes_sets(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_validates_completion() {
    let dir = TempDir::new().unwrap();
    validates_completion(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_appends_batches_atomically() {
    let dir = TempDir::new().unwrap();
    appends_batches_atomically(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_tombstones_workouts() {
    let dir = TempDir::new().unwrap();
    tombstones_workouts(&sqlite_store(&dir).await).await;
}

#[tokio::test]
async fn test_sqlite_replays_log_on_reopen() {
    let dir = TempDir::new().unwrap();
    let workout = bench_session();
    let original = workout.exercises[0].sets[0].clone();
    let corrected = original.revise().reps(9).build();

    {
        let store = sqlite_store(&dir).await;
        append_workout(&store, &workout).await;
        store
            .supersede_set(original.id, corrected.clone())
            .await
            .unwrap();
        assert_eq!(store.record_count().await.unwrap(), 6);
    }

    let reopened = sqlite_store(&dir).await;
    assert_eq!(reopened.record_count().await.unwrap(), 6);
    let stored = reopened.workout(workout.id).await.unwrap().unwrap();
    assert_eq!(stored.active_sets().count(), 2);

    // Supersession survives the restart
    let stale = original.revise().reps(10).build();
    let error = reopened.supersede_set(original.id, stale).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::VersionConflict);
}

#[tokio::test]
async fn test_sqlite_in_memory_url() {
    let store = SqliteRecordStore::open("sqlite::memory:").await.unwrap();
    append_and_materialize(&store).await;
}
