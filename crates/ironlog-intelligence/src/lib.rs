// ABOUTME: Derived-metrics engine computing every analytical value from raw workout records
// ABOUTME: Calculators, PR detection, weekly aggregation, balance, progression, and streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog Intelligence
//!
//! Read-time computation layer. Nothing in this crate performs I/O or keeps
//! state between calls: every value is recomputed from the records the caller
//! passes in, so any metric can be re-derived from a canonical snapshot alone.
//!
//! Configuration is loaded once by the caller ([`IntelligenceConfig::load`])
//! and handed to the calculators explicitly.

pub use ironlog_core::{constants, errors, models};

/// Estimated one-rep-max formulas
pub mod algorithms;
/// Local-calendar helpers (Sunday-start weeks in a fixed UTC offset)
pub mod calendar;
/// Intelligence configuration with environment overrides
pub mod config;
/// Pure set, exercise and workout metric calculators
pub mod metrics;
/// Personal record detection and history replay
pub mod personal_records;
/// Weekly rollups, training-load classification and muscle balance
pub mod aggregation;
/// Short-window trend detection over per-workout series
pub mod progression;
/// Consecutive-week adherence streaks
pub mod streak;

pub use aggregation::{
    balance_score, BalanceAggregator, BalanceReport, BodyRegion, LoadClass, MovementDirection,
    TrainingLoadAssessment, TrainingLoadClassifier, WeeklyAggregator, WeeklyRollup,
};
pub use algorithms::OneRepMaxAlgorithm;
pub use config::{ConfigError, IntelligenceConfig};
pub use metrics::{MetricsCalculator, WorkoutSummary};
pub use personal_records::{Celebration, PersonalRecordDetector, PrEvent, PrMetric};
pub use progression::{
    exercise_series, ProgressionDetector, ProgressionPoint, SeriesMetric, Trend, TrendAnalysis,
};
pub use streak::{StreakCalculator, StreakReport};
