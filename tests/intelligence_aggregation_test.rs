// ABOUTME: Integration tests for weekly rollups, training-load classification, and balance
// ABOUTME: Validates week boundaries, baseline handling, gauge positions, and balance scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::slice;

use chrono::NaiveDate;
use ironlog::intelligence::calendar::offset_from_minutes;
use ironlog::intelligence::config::intelligence::{BalanceConfig, TrainingLoadConfig};
use ironlog::intelligence::{
    balance_score, BalanceAggregator, BodyRegion, LoadClass, TrainingLoadClassifier,
    WeeklyAggregator,
};
use ironlog::models::Workout;
use uuid::Uuid;

use common::{at, back_squat, barbell_row, bench_press, single_exercise_workout, utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn bench_workout(year: i32, month: u32, day: u32, weight_kg: f64) -> Workout {
    single_exercise_workout(
        at(year, month, day, 18),
        Uuid::new_v4(),
        bench_press(),
        &[(weight_kg, 10)],
    )
}

// === Load Classification ===

#[test]
fn test_class_boundaries_are_moderate() {
    let classifier = TrainingLoadClassifier::new();
    assert_eq!(classifier.classify(0.8), LoadClass::Moderate);
    assert_eq!(classifier.classify(1.2), LoadClass::Moderate);
    assert_eq!(classifier.classify(0.79), LoadClass::Light);
    assert_eq!(classifier.classify(1.21), LoadClass::Heavy);
}

#[test]
fn test_gauge_positions() {
    let classifier = TrainingLoadClassifier::new();
    let cases = [
        (0.8, 40.0),
        (1.0, 50.0),
        (1.2, 60.0),
        (0.1, 10.0),
        (0.5, 25.0),
        (3.0, 95.0),
    ];
    for (ratio, expected) in cases {
        let gauge = classifier.gauge_position(ratio);
        assert!(
            (gauge - expected).abs() < 1e-9,
            "ratio {ratio}: expected {expected}, got {gauge}"
        );
    }
}

#[test]
fn test_zero_baseline_is_unavailable() {
    let (ratio, available) = TrainingLoadClassifier::load_ratio(1500.0, 0.0);
    assert!((ratio - 1.0).abs() < f64::EPSILON);
    assert!(!available);

    let (ratio, available) = TrainingLoadClassifier::load_ratio(1500.0, 1000.0);
    assert!((ratio - 1.5).abs() < f64::EPSILON);
    assert!(available);
}

// === Weekly Rollup ===

#[test]
fn test_rollup_fills_gap_weeks() {
    let aggregator = WeeklyAggregator::new(utc());
    let workouts = vec![
        bench_workout(2024, 3, 4, 100.0),
        bench_workout(2024, 3, 6, 100.0),
        bench_workout(2024, 3, 19, 80.0),
    ];

    let rollups = aggregator.rollup(&workouts);
    let weeks: Vec<NaiveDate> = rollups.iter().map(|rollup| rollup.week_start).collect();
    assert_eq!(weeks, vec![date(2024, 3, 3), date(2024, 3, 10), date(2024, 3, 17)]);

    assert_eq!(rollups[0].workout_count, 2);
    assert!((rollups[0].volume_kg - 2000.0).abs() < f64::EPSILON);
    assert_eq!(rollups[1].workout_count, 0);
    assert!(rollups[1].volume_kg.abs() < f64::EPSILON);
    assert!((rollups[2].volume_kg - 800.0).abs() < f64::EPSILON);
}

#[test]
fn test_offset_moves_workout_into_previous_week() {
    // Sunday 02:00 UTC is Saturday evening five hours west
    let mut workout = bench_workout(2024, 3, 10, 100.0);
    workout.started_at = at(2024, 3, 10, 2);

    let west = WeeklyAggregator::new(offset_from_minutes(-300).unwrap());
    let rollups = west.rollup(slice::from_ref(&workout));
    assert_eq!(rollups[0].week_start, date(2024, 3, 3));

    let rollups = WeeklyAggregator::new(utc()).rollup(&[workout]);
    assert_eq!(rollups[0].week_start, date(2024, 3, 10));
}

#[test]
fn test_deleted_and_in_progress_workouts_are_excluded() {
    let mut deleted = bench_workout(2024, 3, 4, 100.0);
    deleted.is_deleted = true;
    let mut open = bench_workout(2024, 3, 5, 100.0);
    open.completed_at = None;
    let kept = bench_workout(2024, 3, 6, 50.0);

    let rollups = WeeklyAggregator::new(utc()).rollup(&[deleted, open, kept]);
    assert_eq!(rollups.len(), 1);
    assert_eq!(rollups[0].workout_count, 1);
    assert!((rollups[0].volume_kg - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_sparse_rpe_suppresses_effort_metrics() {
    let mut workout = single_exercise_workout(
        at(2024, 3, 4, 18),
        Uuid::new_v4(),
        bench_press(),
        &[(100.0, 5), (100.0, 5), (100.0, 5), (100.0, 5)],
    );
    workout.exercises[0].sets[0].rpe = Some(9.0);

    let sparse = WeeklyAggregator::new(utc()).rollup(slice::from_ref(&workout));
    assert!((sparse[0].rpe_coverage - 0.25).abs() < f64::EPSILON);
    assert_eq!(sparse[0].average_rpe, None);
    assert_eq!(sparse[0].hard_sets, None);
    assert_eq!(sparse[0].fatigue_index, None);

    workout.exercises[0].sets[1].rpe = Some(7.0);
    let covered = WeeklyAggregator::new(utc()).rollup(&[workout]);
    assert_eq!(covered[0].average_rpe, Some(8.0));
    assert_eq!(covered[0].hard_sets, Some(1));
    assert_eq!(covered[0].fatigue_index, Some(32.0));
}

// === Training Load Assessment ===

#[test]
fn test_assessment_against_trailing_baseline() {
    let workouts = vec![
        bench_workout(2024, 2, 12, 100.0),
        bench_workout(2024, 2, 19, 100.0),
        bench_workout(2024, 2, 26, 100.0),
        bench_workout(2024, 3, 4, 100.0),
        bench_workout(2024, 3, 11, 110.0),
    ];
    let aggregator = WeeklyAggregator::new(utc());
    let assessment =
        TrainingLoadClassifier::new().assess_workouts(&aggregator, &workouts, at(2024, 3, 13, 12));

    assert_eq!(assessment.week_start, date(2024, 3, 10));
    assert!((assessment.current_volume_kg - 1100.0).abs() < 1e-9);
    assert!((assessment.baseline_volume_kg - 1000.0).abs() < 1e-9);
    assert!((assessment.ratio - 1.1).abs() < 1e-9);
    assert!(assessment.baseline_available);
    assert_eq!(assessment.class, LoadClass::Moderate);
    assert!((assessment.gauge - 55.0).abs() < 1e-9);
}

#[test]
fn test_baseline_ignores_weeks_before_history() {
    let workouts = vec![
        bench_workout(2024, 3, 4, 100.0),
        bench_workout(2024, 3, 11, 200.0),
    ];
    let aggregator = WeeklyAggregator::new(utc());
    let assessment =
        TrainingLoadClassifier::new().assess_workouts(&aggregator, &workouts, at(2024, 3, 13, 12));

    assert!((assessment.baseline_volume_kg - 1000.0).abs() < 1e-9);
    assert!((assessment.ratio - 2.0).abs() < 1e-9);
    assert_eq!(assessment.class, LoadClass::Heavy);
    assert!((assessment.gauge - 95.0).abs() < 1e-9);
}

#[test]
fn test_first_week_has_no_baseline() {
    let workouts = vec![bench_workout(2024, 3, 11, 100.0)];
    let aggregator = WeeklyAggregator::new(utc());
    let assessment =
        TrainingLoadClassifier::new().assess_workouts(&aggregator, &workouts, at(2024, 3, 13, 12));

    assert!(!assessment.baseline_available);
    assert!((assessment.ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(assessment.class, LoadClass::Moderate);
}

// === Balance ===

#[test]
fn test_balance_report() {
    let workouts = vec![
        single_exercise_workout(at(2024, 3, 11, 18), Uuid::new_v4(), bench_press(), &[(100.0, 10)]),
        single_exercise_workout(at(2024, 3, 12, 18), Uuid::new_v4(), barbell_row(), &[(50.0, 10)]),
        single_exercise_workout(at(2024, 3, 13, 18), Uuid::new_v4(), back_squat(), &[(150.0, 10)]),
    ];

    let report = BalanceAggregator::new().analyze(&workouts, at(2024, 3, 14, 12));

    assert!((report.push_volume_kg - 1000.0).abs() < f64::EPSILON);
    assert!((report.pull_volume_kg - 500.0).abs() < f64::EPSILON);
    assert!((report.push_pull_ratio - 2.0).abs() < f64::EPSILON);
    assert!(report.push_pull_defined);
    assert!((report.upper_lower_ratio - 1.0).abs() < f64::EPSILON);
    assert!(report.upper_lower_defined);

    assert_eq!(report.muscle_group_volume.get("chest"), Some(&1000.0));
    assert_eq!(report.muscle_group_volume.get("quads"), Some(&1500.0));
    // Secondary muscles receive nothing
    assert_eq!(report.muscle_group_volume.get("glutes"), None);

    assert!((report.muscle_balance_score - 77.777_777).abs() < 1e-3);
    assert!((report.pattern_balance_score - 77.777_777).abs() < 1e-3);
}

#[test]
fn test_balance_window_excludes_old_workouts() {
    let workouts = vec![
        single_exercise_workout(at(2024, 1, 8, 18), Uuid::new_v4(), barbell_row(), &[(50.0, 10)]),
        single_exercise_workout(at(2024, 3, 11, 18), Uuid::new_v4(), bench_press(), &[(100.0, 10)]),
    ];

    let report = BalanceAggregator::new().analyze(&workouts, at(2024, 3, 14, 12));
    assert!(report.pull_volume_kg.abs() < f64::EPSILON);
    assert!(!report.push_pull_defined);
    assert!((report.push_pull_ratio - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_balance_score_extremes() {
    assert!(balance_score(Vec::<f64>::new()).abs() < f64::EPSILON);
    assert!((balance_score(vec![500.0, 500.0, 500.0]) - 100.0).abs() < 1e-9);
    assert!((balance_score(vec![1200.0]) - 100.0).abs() < 1e-9);
}

#[test]
fn test_longest_vocabulary_match_decides_region() {
    let aggregator = BalanceAggregator::new();
    assert_eq!(aggregator.classify_muscle("Lower Back"), Some(BodyRegion::Lower));
    assert_eq!(aggregator.classify_muscle("upper back"), Some(BodyRegion::Upper));
    assert_eq!(aggregator.classify_muscle("back"), Some(BodyRegion::Upper));
}

#[test]
fn test_oversized_windows_cover_whole_history() {
    let workouts = vec![
        bench_workout(2023, 6, 5, 100.0),
        bench_workout(2024, 3, 4, 100.0),
        bench_workout(2024, 3, 11, 150.0),
    ];
    let now = at(2024, 3, 13, 12);

    let balance = BalanceAggregator::from_config(
        &BalanceConfig {
            window_weeks: 2_000_000_000_000_000,
            ..BalanceConfig::default()
        },
        true,
    );
    let report = balance.analyze(&workouts, now);
    assert!((report.upper_volume_kg - 3500.0).abs() < 1e-9);

    let classifier = TrainingLoadClassifier::from_config(&TrainingLoadConfig {
        trailing_weeks: usize::MAX,
        ..TrainingLoadConfig::default()
    });
    let assessment = classifier.assess_workouts(&WeeklyAggregator::new(utc()), &workouts, now);
    assert!(assessment.baseline_available);
    // Two sessions spread over every week since June 2023
    assert!(assessment.baseline_volume_kg > 0.0);
    assert!(assessment.baseline_volume_kg < 100.0);
}

#[test]
fn test_unmatched_labels_are_unclassified() {
    let aggregator = BalanceAggregator::new();
    assert_eq!(aggregator.classify_muscle("core"), None);
    assert_eq!(aggregator.classify_pattern("carry"), None);
    assert!(aggregator.classify_pattern("Overhead Press").is_some());
    assert!(aggregator.classify_muscle(" Hamstrings ").is_some());
}
