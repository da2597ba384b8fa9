// ABOUTME: Integration tests for personal-record detection and celebration selection
// ABOUTME: Validates strict comparisons, empty history, warmup exclusion, and chronological replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use ironlog::intelligence::config::intelligence::PersonalRecordConfig;
use ironlog::intelligence::{
    Celebration, OneRepMaxAlgorithm, PersonalRecordDetector, PrMetric,
};
use ironlog::models::{SetRecord, SetRecordBuilder};
use uuid::Uuid;

use common::at;

fn set(exercise_id: Uuid, weight_kg: f64, reps: u32) -> SetRecord {
    SetRecordBuilder::new(exercise_id, 1)
        .weight_kg(weight_kg)
        .reps(reps)
        .build()
}

#[test]
fn test_empty_history_makes_any_positive_value_a_record() {
    let detector = PersonalRecordDetector::new();
    let history: Vec<SetRecord> = Vec::new();

    assert!(detector.is_personal_record(50.0, &history, PrMetric::Weight));
    assert!(!detector.is_personal_record(0.0, &history, PrMetric::Weight));
}

#[test]
fn test_tie_is_not_a_record() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let history = vec![set(exercise_id, 100.0, 5)];
    let candidate = set(exercise_id, 100.0, 5);

    assert!(detector.detect_set_prs(&candidate, &history).is_empty());
}

#[test]
fn test_more_reps_at_same_weight() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let history = vec![set(exercise_id, 100.0, 5)];
    let candidate = set(exercise_id, 100.0, 6);

    assert_eq!(
        detector.detect_set_prs(&candidate, &history),
        vec![PrMetric::OneRepMax, PrMetric::Volume, PrMetric::Reps]
    );
}

#[test]
fn test_warmup_candidate_never_qualifies() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let history = vec![set(exercise_id, 60.0, 5)];
    let mut candidate = set(exercise_id, 140.0, 5);
    candidate.is_warmup = true;

    assert!(detector.detect_set_prs(&candidate, &history).is_empty());
    assert_eq!(detector.select_celebration(&candidate, &history), None);
}

#[test]
fn test_deleted_and_warmup_history_is_ignored() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let mut deleted = set(exercise_id, 120.0, 5);
    deleted.is_deleted = true;
    let mut warmup = set(exercise_id, 110.0, 5);
    warmup.is_warmup = true;
    let history = vec![deleted, warmup, set(exercise_id, 90.0, 5)];

    let candidate = set(exercise_id, 100.0, 5);
    assert_eq!(
        detector.historical_max(&history, PrMetric::Weight),
        Some(90.0)
    );
    assert!(detector
        .detect_set_prs(&candidate, &history)
        .contains(&PrMetric::Weight));
}

#[test]
fn test_candidate_is_not_compared_with_itself() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let candidate = set(exercise_id, 100.0, 5);
    let history = vec![set(exercise_id, 90.0, 5), candidate.clone()];

    assert!(detector
        .detect_set_prs(&candidate, &history)
        .contains(&PrMetric::Weight));
}

// === Celebration ===

#[test]
fn test_first_meaningful_attempt() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let history: Vec<SetRecord> = Vec::new();

    assert_eq!(
        detector.select_celebration(&set(exercise_id, 20.0, 3), &history),
        Some(Celebration::FirstMeaningfulAttempt {
            weight_kg: 20.0,
            reps: 3
        })
    );
    assert_eq!(
        detector.select_celebration(&set(exercise_id, 10.0, 5), &history),
        Some(Celebration::FirstMeaningfulAttempt {
            weight_kg: 10.0,
            reps: 5
        })
    );
    assert_eq!(
        detector.select_celebration(&set(exercise_id, 10.0, 3), &history),
        None
    );
}

#[test]
fn test_celebration_prefers_weight_then_one_rep_max() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let history = vec![set(exercise_id, 100.0, 5)];

    assert_eq!(
        detector.select_celebration(&set(exercise_id, 102.5, 3), &history),
        Some(Celebration::PersonalRecord {
            metric: PrMetric::Weight,
            value: 102.5,
            previous_best: 100.0,
        })
    );

    let Some(Celebration::PersonalRecord { metric, .. }) =
        detector.select_celebration(&set(exercise_id, 95.0, 8), &history)
    else {
        panic!("expected a one-rep-max record");
    };
    assert_eq!(metric, PrMetric::OneRepMax);

    // Reps alone never trigger a celebration
    assert_eq!(
        detector.select_celebration(&set(exercise_id, 40.0, 12), &history),
        None
    );
}

// === History Replay ===

#[test]
fn test_record_history_replays_chronologically() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let first = set(exercise_id, 60.0, 5);
    let tie = set(exercise_id, 60.0, 5);
    let heavier = set(exercise_id, 65.0, 5);

    // Supplied out of order on purpose
    let events = detector.record_history(vec![
        (at(2024, 3, 14, 18), &heavier),
        (at(2024, 3, 10, 18), &first),
        (at(2024, 3, 12, 18), &tie),
    ]);

    assert_eq!(events.len(), 7);
    assert!(events[..4].iter().all(|event| event.set_id == first.id));
    assert!(events[..4].iter().all(|event| event.previous_best.is_none()));

    let later: Vec<PrMetric> = events[4..].iter().map(|event| event.metric).collect();
    assert_eq!(
        later,
        vec![PrMetric::Weight, PrMetric::OneRepMax, PrMetric::Volume]
    );
    assert!(events[4..].iter().all(|event| event.set_id == heavier.id));
    assert_eq!(events[4].previous_best, Some(60.0));
}

#[test]
fn test_recent_records_window() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let old = set(exercise_id, 60.0, 5);
    let recent = set(exercise_id, 70.0, 5);
    let now = at(2024, 4, 30, 12);

    let events = detector.record_history(vec![
        (now - Duration::days(40), &old),
        (now - Duration::days(5), &recent),
    ]);
    let badges = detector.recent_records(&events, now);

    assert!(!badges.is_empty());
    assert!(badges.iter().all(|event| event.set_id == recent.id));
}

#[test]
fn test_bodyweight_sets_leave_no_weight_best() {
    let detector = PersonalRecordDetector::new();
    let exercise_id = Uuid::new_v4();
    let bodyweight = SetRecordBuilder::new(exercise_id, 1).reps(12).build();
    let weighted = set(exercise_id, 10.0, 8);
    let start = at(2024, 4, 1, 18);

    let events = detector.record_history(vec![
        (start, &bodyweight),
        (start + Duration::days(2), &weighted),
    ]);

    let weight = events
        .iter()
        .find(|event| event.metric == PrMetric::Weight)
        .unwrap();
    assert_eq!(weight.set_id, weighted.id);
    assert_eq!(weight.previous_best, None);
    // The bodyweight set's 12 reps still count as history
    assert!(events.iter().all(|event| event.metric != PrMetric::Reps));
}

#[test]
fn test_oversized_recent_window_covers_whole_history() {
    let config = PersonalRecordConfig {
        recent_window_days: i64::MAX,
        ..PersonalRecordConfig::default()
    };
    let detector = PersonalRecordDetector::from_config(&config, OneRepMaxAlgorithm::Brzycki);
    let first = set(Uuid::new_v4(), 60.0, 5);
    let now = at(2024, 4, 30, 12);

    let events = detector.record_history(vec![(at(2001, 1, 1, 9), &first)]);
    assert_eq!(detector.recent_records(&events, now).len(), events.len());
}

#[test]
fn test_metric_names_round_trip() {
    for metric in PrMetric::ALL {
        assert_eq!(metric.name().parse::<PrMetric>().unwrap(), metric);
    }
    assert_eq!(
        serde_json::to_value(PrMetric::OneRepMax).unwrap(),
        serde_json::json!("1rm")
    );
}
