// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides workout, exercise, and snapshot document builders with fixed dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `ironlog`
//!
//! Dates are fixed so week-boundary assertions are deterministic:
//! 2024-03-10, 2024-03-17 and 2024-03-24 are Sundays.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use ironlog::models::{ExerciseDefinition, ExerciseInstance, SetRecordBuilder, Workout};
use serde_json::{json, Value};
use uuid::Uuid;

/// UTC instant at the given date and hour
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// UTC as a fixed offset
pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Canonical bench press definition
pub fn bench_press() -> ExerciseDefinition {
    ExerciseDefinition::named("Bench Press")
        .movement_pattern("horizontal press")
        .primary("chest")
        .secondary("triceps")
        .equipment("barbell")
}

/// Canonical barbell row definition
pub fn barbell_row() -> ExerciseDefinition {
    ExerciseDefinition::named("Barbell Row")
        .movement_pattern("horizontal pull")
        .primary("back")
        .equipment("barbell")
}

/// Canonical back squat definition
pub fn back_squat() -> ExerciseDefinition {
    ExerciseDefinition::named("Back Squat")
        .movement_pattern("squat")
        .primary("quads")
        .secondary("glutes")
        .equipment("barbell")
}

/// Completed one-hour workout with no exercises
pub fn completed_workout(name: &str, started_at: DateTime<Utc>) -> Workout {
    let mut workout = Workout::new(name, started_at);
    workout.completed_at = Some(started_at + Duration::hours(1));
    workout
}

/// Append an exercise with `(weight_kg, reps)` working sets to a workout
pub fn add_exercise(
    workout: &mut Workout,
    exercise_ref_id: Uuid,
    definition: ExerciseDefinition,
    sets: &[(f64, u32)],
) -> Uuid {
    let order = u32::try_from(workout.exercises.len()).unwrap();
    let mut exercise = ExerciseInstance::new(workout.id, exercise_ref_id, definition, order);
    for (index, (weight_kg, reps)) in sets.iter().enumerate() {
        let set_number = u32::try_from(index).unwrap() + 1;
        exercise.sets.push(
            SetRecordBuilder::new(exercise.id, set_number)
                .weight_kg(*weight_kg)
                .reps(*reps)
                .completed_at(workout.started_at + Duration::minutes(i64::from(set_number) * 5))
                .build(),
        );
    }
    let id = exercise.id;
    workout.exercises.push(exercise);
    id
}

/// Completed workout with a single exercise
pub fn single_exercise_workout(
    started_at: DateTime<Utc>,
    exercise_ref_id: Uuid,
    definition: ExerciseDefinition,
    sets: &[(f64, u32)],
) -> Workout {
    let mut workout = completed_workout("Strength", started_at);
    add_exercise(&mut workout, exercise_ref_id, definition, sets);
    workout
}

/// Snapshot document in the original 1.0.0 layout
///
/// Exercise definitions are flat fields and sets use `weight`/`rest`.
pub fn legacy_snapshot_document(workout_id: Uuid, exercise_ref_id: Uuid) -> Value {
    let exercise_id = Uuid::new_v4();
    json!({
        "schema_version": "1.0.0",
        "workout_id": workout_id,
        "created_at": "2024-03-12T19:05:00Z",
        "updated_at": "2024-03-12T19:00:00Z",
        "metadata": {
            "name": "Push Day",
            "started_at": "2024-03-12T18:00:00Z",
            "completed_at": "2024-03-12T19:00:00Z",
            "timezone": "Europe/Paris",
            "bodyweight_kg": 82.0,
            "sleep_hours": null,
            "readiness_score": null,
            "notes": null,
            "template_id": null,
            "is_deleted": false,
            "deleted_at": null
        },
        "exercises": [{
            "exercise_id": exercise_id,
            "exercise_ref_id": exercise_ref_id,
            "order": 0,
            "superset_id": null,
            "notes": null,
            "is_deleted": false,
            "exercise_name": "Bench Press",
            "movement_pattern": "horizontal press",
            "muscle_groups": ["chest"],
            "equipment": "barbell",
            "sets": [
                {
                    "set_id": Uuid::new_v4(),
                    "set_number": 1,
                    "weight": 60.0,
                    "reps": 12,
                    "rpe": null,
                    "rest": 90,
                    "tempo": null,
                    "is_warmup": true,
                    "is_failure": false,
                    "is_deleted": false,
                    "completed_at": "2024-03-12T18:10:00Z"
                },
                {
                    "set_id": Uuid::new_v4(),
                    "set_number": 2,
                    "weight": 80.0,
                    "reps": 8,
                    "rpe": 8.0,
                    "rest": 150,
                    "tempo": null,
                    "is_warmup": false,
                    "is_failure": false,
                    "is_deleted": false,
                    "completed_at": "2024-03-12T18:20:00Z"
                },
                {
                    "set_id": Uuid::new_v4(),
                    "set_number": 3,
                    "weight": 85.0,
                    "reps": 6,
                    "rpe": 9.0,
                    "rest": 180,
                    "tempo": null,
                    "is_warmup": false,
                    "is_failure": false,
                    "is_deleted": false,
                    "completed_at": "2024-03-12T18:30:00Z"
                }
            ]
        }]
    })
}
