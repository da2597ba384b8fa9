// ABOUTME: Integration tests for the weekly adherence streak calculator
// ABOUTME: Covers pro-rated current weeks, neutral empty weeks, and broken streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, Utc};
use ironlog::intelligence::calendar::offset_from_minutes;
use ironlog::intelligence::StreakCalculator;
use uuid::Uuid;

use common::{at, bench_press, single_exercise_workout, utc};

fn starts(days: &[(u32, u32)]) -> Vec<DateTime<Utc>> {
    days.iter()
        .map(|(month, day)| at(2024, *month, *day, 8))
        .collect()
}

#[test]
fn test_daily_training_counts_every_week() {
    let first = at(2024, 3, 3, 8);
    let workout_starts: Vec<DateTime<Utc>> =
        (0..25).map(|day| first + Duration::days(day)).collect();

    let report = StreakCalculator::new().calculate(&workout_starts, at(2024, 3, 27, 12), utc());

    assert_eq!(report.weeks, 4);
    assert_eq!(report.current_week_count, 4);
    // Wednesday is day four of the week
    assert_eq!(report.current_week_expected, 1);
    assert_eq!(report.target_per_week, 3);
}

#[test]
fn test_no_workouts_is_zero() {
    let report = StreakCalculator::new().calculate(&[], at(2024, 3, 27, 12), utc());
    assert_eq!(report.weeks, 0);
    assert_eq!(report.current_week_count, 0);
}

#[test]
fn test_empty_current_week_is_neutral_early_on() {
    let workout_starts = starts(&[(3, 11), (3, 12), (3, 14), (3, 18), (3, 20), (3, 22)]);

    // Sunday morning, nothing expected yet
    let report = StreakCalculator::new().calculate(&workout_starts, at(2024, 3, 24, 6), utc());
    assert_eq!(report.current_week_expected, 0);
    assert_eq!(report.weeks, 2);
}

#[test]
fn test_short_week_breaks_streak() {
    let workout_starts = starts(&[(3, 11), (3, 12), (3, 14), (3, 18), (3, 20)]);

    let report = StreakCalculator::new().calculate(&workout_starts, at(2024, 3, 24, 6), utc());
    assert_eq!(report.weeks, 0);

    let relaxed = StreakCalculator::new()
        .with_target(2)
        .calculate(&workout_starts, at(2024, 3, 24, 6), utc());
    assert_eq!(relaxed.weeks, 2);
}

#[test]
fn test_expected_so_far_rounds_down() {
    let calculator = StreakCalculator::new();
    assert_eq!(calculator.expected_so_far(1), 0);
    assert_eq!(calculator.expected_so_far(3), 1);
    assert_eq!(calculator.expected_so_far(5), 2);
    assert_eq!(calculator.expected_so_far(7), 3);
    assert_eq!(calculator.expected_so_far(10), 3);
}

#[test]
fn test_future_workouts_are_ignored() {
    let workout_starts = starts(&[(3, 18), (3, 19), (3, 20), (3, 30)]);
    let report = StreakCalculator::new().calculate(&workout_starts, at(2024, 3, 23, 12), utc());
    assert_eq!(report.current_week_count, 3);
    assert_eq!(report.weeks, 1);
}

#[test]
fn test_local_offset_shifts_week_membership() {
    // Sunday 02:00 UTC belongs to Saturday five hours west
    let workout_starts = vec![at(2024, 3, 10, 2)];
    let now = at(2024, 3, 10, 12);

    let utc_report = StreakCalculator::new().calculate(&workout_starts, now, utc());
    assert_eq!(utc_report.current_week_count, 1);

    let west = offset_from_minutes(-300).unwrap();
    let west_report = StreakCalculator::new().calculate(&workout_starts, now, west);
    assert_eq!(west_report.current_week_count, 0);
}

#[test]
fn test_deleted_workouts_do_not_count() {
    let mut workouts: Vec<_> = [11, 12, 13]
        .into_iter()
        .map(|day| single_exercise_workout(at(2024, 3, day, 8), Uuid::new_v4(), bench_press(), &[(60.0, 5)]))
        .collect();

    let now = at(2024, 3, 17, 6);
    let report = StreakCalculator::new().calculate_for_workouts(&workouts, now, utc());
    assert_eq!(report.weeks, 1);

    workouts[0].is_deleted = true;
    let report = StreakCalculator::new().calculate_for_workouts(&workouts, now, utc());
    assert_eq!(report.weeks, 0);
}
