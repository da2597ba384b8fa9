// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Formula coefficients, thresholds, and schema versions for the workout engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Values here are defaults; anything a user
//! may want to tune is surfaced again through the intelligence configuration.

/// Canonical snapshot schema versions
pub mod schema {
    /// Schema version written by the current snapshot builder
    pub const CURRENT_SCHEMA_VERSION: &str = "1.2.0";
    /// Oldest schema version the migration chain understands
    pub const OLDEST_SUPPORTED_SCHEMA_VERSION: &str = "1.0.0";
    /// Upper bound on migration steps, guards against cyclic chains
    pub const MAX_MIGRATION_STEPS: usize = 16;
}

/// Estimated one-rep-max formula coefficients
pub mod one_rep_max {
    /// Rep count above which rep-based formulas become unreliable
    pub const MAX_RELIABLE_REPS: u32 = 12;
    /// Conservative multiplier applied to the weight above `MAX_RELIABLE_REPS`
    pub const HIGH_REP_MULTIPLIER: f64 = 1.3;
    /// Brzycki numerator: `weight * 36 / (37 - reps)`
    pub const BRZYCKI_NUMERATOR: f64 = 36.0;
    /// Brzycki denominator base
    pub const BRZYCKI_DENOMINATOR_BASE: f64 = 37.0;
    /// Epley divisor: `weight * (1 + reps / 30)`
    pub const EPLEY_DIVISOR: f64 = 30.0;
}

/// Effort classification thresholds
pub mod effort {
    /// Minimum RPE for a hard set
    pub const HARD_SET_MIN_RPE: f64 = 8.0;
    /// Maximum reps-in-reserve for a hard set
    pub const HARD_SET_MAX_RIR: u8 = 2;
    /// Lowest valid RPE
    pub const RPE_MIN: f64 = 1.0;
    /// Highest valid RPE
    pub const RPE_MAX: f64 = 10.0;
    /// Highest valid RIR
    pub const RIR_MAX: u8 = 5;
}

/// Weekly training-load classification
pub mod training_load {
    /// Ratios below this classify as light
    pub const LIGHT_UPPER_RATIO: f64 = 0.8;
    /// Ratios above this classify as heavy
    pub const HEAVY_LOWER_RATIO: f64 = 1.2;
    /// Share of working sets that must carry RPE before RPE metrics are shown
    pub const MIN_RPE_COVERAGE: f64 = 0.3;
    /// Trailing weeks used for the baseline average
    pub const TRAILING_WEEKS: usize = 4;
    /// Largest accepted baseline window (about ten years)
    pub const MAX_TRAILING_WEEKS: usize = 520;
    /// Gauge floor for light weeks
    pub const GAUGE_LIGHT_FLOOR: f64 = 10.0;
    /// Gauge position where light ends and moderate begins
    pub const GAUGE_MODERATE_START: f64 = 40.0;
    /// Gauge position where moderate ends and heavy begins
    pub const GAUGE_HEAVY_START: f64 = 60.0;
    /// Gauge ceiling for heavy weeks
    pub const GAUGE_HEAVY_CEILING: f64 = 95.0;
    /// Gauge points per unit of ratio in the light and heavy bands
    pub const GAUGE_RATIO_SCALE: f64 = 50.0;
}

/// Personal record policy defaults
pub mod personal_records {
    /// Window used to highlight recent records
    pub const RECENT_WINDOW_DAYS: i64 = 30;
    /// Largest accepted recent-record window (about ten years)
    pub const MAX_RECENT_WINDOW_DAYS: i64 = 3650;
    /// Minimum weight for a first-attempt celebration
    pub const MEANINGFUL_MIN_WEIGHT_KG: f64 = 20.0;
    /// Minimum reps for a first-attempt celebration
    pub const MEANINGFUL_MIN_REPS: u32 = 5;
}

/// Progression detection defaults
pub mod progression {
    /// Points in the trailing window
    pub const WINDOW_SIZE: usize = 4;
    /// Normalized slope per point that counts as a trend (0.5%)
    pub const SIGNIFICANCE_THRESHOLD: f64 = 0.005;
}

/// Streak defaults
pub mod streak {
    /// Workouts per week required to extend a streak
    pub const TARGET_PER_WEEK: u32 = 3;
    /// Maximum weeks walked backward
    pub const MAX_WEEKS: u32 = 52;
    /// Largest accepted walk limit
    pub const MAX_WEEKS_LIMIT: u32 = 520;
}

/// Muscle and movement balance defaults
pub mod balance {
    /// Trailing weeks considered
    pub const WINDOW_WEEKS: i64 = 4;
    /// Largest accepted balance window (about ten years)
    pub const MAX_WINDOW_WEEKS: i64 = 520;
    /// Movement-pattern keywords classified as push
    pub const PUSH_KEYWORDS: &[&str] = &["push", "press"];
    /// Movement-pattern keywords classified as pull
    pub const PULL_KEYWORDS: &[&str] = &["pull", "row"];
    /// Muscle-group labels counted as upper body
    ///
    /// Labels are matched by substring and the longest matching entry across
    /// both vocabularies decides, so "lower back" lands in the lower bucket
    /// even though it contains "back".
    pub const UPPER_BODY_MUSCLES: &[&str] = &[
        "chest",
        "back",
        "lats",
        "traps",
        "shoulders",
        "delts",
        "biceps",
        "triceps",
        "forearms",
    ];
    /// Muscle-group labels counted as lower body
    pub const LOWER_BODY_MUSCLES: &[&str] = &[
        "quads",
        "quadriceps",
        "hamstrings",
        "glutes",
        "calves",
        "adductors",
        "abductors",
        "hip",
        "legs",
        "lower back",
    ];
}

/// Time conversions
pub mod time {
    /// Days in a calendar week
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Seconds per minute as an integer, for offset conversions
    pub const SECONDS_PER_MINUTE_I32: i32 = 60;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the command-line binary
    pub const IRONLOG_CLI: &str = "ironlog-cli";
    /// Default service name for log records
    pub const IRONLOG: &str = "ironlog";
}
