// ABOUTME: Integration tests for canonical workout snapshots and schema migration
// ABOUTME: Covers lossless rebuild, updated_at derivation, legacy upgrades, and version rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use ironlog::constants::schema::CURRENT_SCHEMA_VERSION;
use ironlog::errors::ErrorCode;
use ironlog::intelligence::MetricsCalculator;
use ironlog::models::Workout;
use ironlog::snapshot::{MigrationChain, WorkoutSnapshot};
use serde_json::json;
use uuid::Uuid;

use common::{add_exercise, at, back_squat, bench_press, completed_workout, legacy_snapshot_document};

fn push_pull_workout() -> Workout {
    let mut workout = completed_workout("Upper", at(2024, 3, 12, 18));
    workout.context.bodyweight_kg = Some(82.0);
    workout.timezone = Some("Europe/Paris".into());
    add_exercise(
        &mut workout,
        Uuid::new_v4(),
        bench_press(),
        &[(60.0, 12), (80.0, 8), (85.0, 6)],
    );
    add_exercise(&mut workout, Uuid::new_v4(), back_squat(), &[(120.0, 5)]);
    workout.exercises[0].sets[0].is_warmup = true;
    workout.exercises[0].sets[2].rpe = Some(9.0);
    workout
}

// === Build and Rebuild ===

#[test]
fn test_snapshot_round_trip_is_lossless() {
    let workout = push_pull_workout();
    let snapshot = WorkoutSnapshot::build(&workout, at(2024, 3, 12, 20)).unwrap();
    assert_eq!(snapshot.schema_version, CURRENT_SCHEMA_VERSION);

    let json = serde_json::to_string(&snapshot.to_value().unwrap()).unwrap();
    let parsed = WorkoutSnapshot::from_json(&json).unwrap();
    assert_eq!(parsed, snapshot);

    let rebuilt = parsed.to_workout();
    assert_eq!(rebuilt, workout);

    let calculator = MetricsCalculator::new();
    assert_eq!(
        calculator.workout_summary(&rebuilt),
        calculator.workout_summary(&workout)
    );
}

#[test]
fn test_in_progress_workout_is_rejected() {
    let mut workout = push_pull_workout();
    workout.completed_at = None;

    let error = WorkoutSnapshot::build(&workout, at(2024, 3, 12, 20)).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_updated_at_is_latest_captured_change() {
    let mut workout = push_pull_workout();
    let snapshot = WorkoutSnapshot::build(&workout, at(2024, 3, 13, 9)).unwrap();
    assert_eq!(snapshot.updated_at, at(2024, 3, 12, 19));
    assert_eq!(snapshot.created_at, at(2024, 3, 13, 9));

    // A set completed after the session end moves updated_at forward
    let late = workout.started_at + Duration::minutes(75);
    workout.exercises[1].sets[0].completed_at = Some(late);
    let snapshot = WorkoutSnapshot::build(&workout, at(2024, 3, 13, 9)).unwrap();
    assert_eq!(snapshot.updated_at, late);

    workout.is_deleted = true;
    workout.deleted_at = Some(at(2024, 3, 14, 7));
    let snapshot = WorkoutSnapshot::build(&workout, at(2024, 3, 14, 8)).unwrap();
    assert_eq!(snapshot.updated_at, at(2024, 3, 14, 7));
    assert!(snapshot.metadata.is_deleted);
}

#[test]
fn test_exercises_are_ordered_by_position() {
    let mut workout = push_pull_workout();
    workout.exercises.reverse();

    let snapshot = WorkoutSnapshot::build(&workout, at(2024, 3, 12, 20)).unwrap();
    let orders: Vec<u32> = snapshot.exercises.iter().map(|exercise| exercise.order).collect();
    assert_eq!(orders, vec![0, 1]);
}

// === Migration ===

#[test]
fn test_legacy_document_is_migrated() {
    let workout_id = Uuid::new_v4();
    let exercise_ref_id = Uuid::new_v4();
    let document = legacy_snapshot_document(workout_id, exercise_ref_id);

    let migrated = MigrationChain::standard().migrate(document.clone()).unwrap();
    assert_eq!(migrated["schema_version"], json!(CURRENT_SCHEMA_VERSION));
    assert_eq!(
        migrated["exercises"][0]["exercise_definition"]["name"],
        json!("Bench Press")
    );
    assert_eq!(migrated["exercises"][0]["sets"][1]["weight_kg"], json!(80.0));
    assert!(migrated["exercises"][0].get("exercise_name").is_none());
    assert!(migrated["exercises"][0]["sets"][1].get("weight").is_none());

    let snapshot = WorkoutSnapshot::from_value(document).unwrap();
    assert_eq!(snapshot.workout_id, workout_id);
    let exercise = &snapshot.exercises[0];
    assert_eq!(exercise.exercise_ref_id, exercise_ref_id);
    assert_eq!(exercise.exercise_definition.primary_muscle_groups, vec!["chest".to_owned()]);
    assert_eq!(exercise.sets[2].rest_seconds, Some(180));
    assert_eq!(exercise.sets[2].rir, None);
    assert!(!exercise.sets[2].is_dropset);

    let summary = MetricsCalculator::new().workout_summary(&snapshot.to_workout());
    assert!((summary.volume_kg - 1150.0).abs() < f64::EPSILON);
}

#[test]
fn test_unknown_versions_are_rejected() {
    let workout_id = Uuid::new_v4();
    let exercise_ref_id = Uuid::new_v4();

    for version in [json!("9.9.9"), json!("1.1"), json!("0.9.0"), json!(12)] {
        let mut document = legacy_snapshot_document(workout_id, exercise_ref_id);
        document["schema_version"] = version.clone();
        let error = WorkoutSnapshot::from_value(document).unwrap_err();
        assert_eq!(
            error.code,
            ErrorCode::UnsupportedSchemaVersion,
            "version {version}"
        );
    }

    let mut missing = legacy_snapshot_document(workout_id, exercise_ref_id);
    missing.as_object_mut().unwrap().remove("schema_version");
    let error = WorkoutSnapshot::from_value(missing).unwrap_err();
    assert_eq!(error.code, ErrorCode::UnsupportedSchemaVersion);
}

#[test]
fn test_malformed_legacy_exercise_fails_migration() {
    let mut document = legacy_snapshot_document(Uuid::new_v4(), Uuid::new_v4());
    document["exercises"][0]
        .as_object_mut()
        .unwrap()
        .remove("exercise_name");

    let error = WorkoutSnapshot::from_value(document).unwrap_err();
    assert_eq!(error.code, ErrorCode::MigrationFailed);
}

#[test]
fn test_invalid_json_is_a_serialization_error() {
    let error = WorkoutSnapshot::from_json("{ not json").unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}
