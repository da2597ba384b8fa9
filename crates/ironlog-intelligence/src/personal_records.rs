// ABOUTME: Personal record detection derived entirely from set history
// ABOUTME: Strict comparisons, celebration priority, chronological replay, and recent-record windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Personal record detection
//!
//! No "current record" is ever stored. A record is whatever the caller-supplied
//! history says it is at the moment of the call. Two policies live here:
//!
//! - [`PersonalRecordDetector::detect_set_prs`] and
//!   [`PersonalRecordDetector::select_celebration`] compare against the full
//!   history and decide whether a freshly completed set is worth celebrating.
//! - [`PersonalRecordDetector::recent_records`] only filters already-detected
//!   events into a badge window (30 days by default). It never creates or
//!   suppresses a record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::algorithms::OneRepMaxAlgorithm;
use crate::calendar::days_before;
use crate::config::intelligence::PersonalRecordConfig;
use crate::errors::AppError;
use crate::metrics::set_volume;
use crate::models::SetRecord;

/// Tracked personal-record metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrMetric {
    /// Heaviest weight lifted
    #[serde(rename = "weight")]
    Weight,
    /// Best estimated one-rep max
    #[serde(rename = "1rm")]
    OneRepMax,
    /// Largest single-set volume
    #[serde(rename = "volume")]
    Volume,
    /// Most repetitions in one set
    #[serde(rename = "reps")]
    Reps,
}

impl PrMetric {
    /// Every tracked metric
    pub const ALL: [Self; 4] = [Self::Weight, Self::OneRepMax, Self::Volume, Self::Reps];

    /// Order in which a single-celebration UI picks a record
    pub const CELEBRATION_PRIORITY: [Self; 3] = [Self::Weight, Self::OneRepMax, Self::Volume];

    /// Get metric name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::OneRepMax => "1rm",
            Self::Volume => "volume",
            Self::Reps => "reps",
        }
    }
}

impl fmt::Display for PrMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" => Ok(Self::Weight),
            "1rm" | "one_rep_max" => Ok(Self::OneRepMax),
            "volume" => Ok(Self::Volume),
            "reps" => Ok(Self::Reps),
            other => Err(AppError::invalid_input(format!(
                "Unknown record metric: '{other}'. Valid options: weight, 1rm, volume, reps"
            ))),
        }
    }
}

/// The single celebration shown for a completed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Celebration {
    /// The set beat the historical best for `metric`
    PersonalRecord {
        /// Metric that improved
        metric: PrMetric,
        /// New best value
        value: f64,
        /// Best value before this set
        previous_best: f64,
    },
    /// First logged set of an exercise that clears the meaningful-minimum gate
    FirstMeaningfulAttempt {
        /// Weight lifted
        weight_kg: f64,
        /// Repetitions completed
        reps: u32,
    },
}

/// A record set at a point in time, produced by history replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrEvent {
    /// Metric that improved
    pub metric: PrMetric,
    /// New best value
    pub value: f64,
    /// Best value before this set, `None` for the first record
    pub previous_best: Option<f64>,
    /// Set that achieved it
    pub set_id: Uuid,
    /// When it was achieved
    pub achieved_at: DateTime<Utc>,
}

/// Personal-record detector
#[derive(Debug, Clone)]
pub struct PersonalRecordDetector {
    algorithm: OneRepMaxAlgorithm,
    meaningful_min_weight_kg: f64,
    meaningful_min_reps: u32,
    recent_window_days: i64,
}

impl Default for PersonalRecordDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalRecordDetector {
    /// Create a detector with default policy and the Brzycki formula
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PersonalRecordConfig::default(), OneRepMaxAlgorithm::default())
    }

    /// Create a detector from configuration
    #[must_use]
    pub const fn from_config(config: &PersonalRecordConfig, algorithm: OneRepMaxAlgorithm) -> Self {
        Self {
            algorithm,
            meaningful_min_weight_kg: config.meaningful_min_weight_kg,
            meaningful_min_reps: config.meaningful_min_reps,
            recent_window_days: config.recent_window_days,
        }
    }

    /// Value of `metric` for one set
    #[must_use]
    pub fn metric_value(&self, set: &SetRecord, metric: PrMetric) -> f64 {
        match metric {
            PrMetric::Weight => set.weight_kg.unwrap_or(0.0).max(0.0),
            PrMetric::OneRepMax => self.algorithm.estimate(set.weight_kg, set.reps),
            PrMetric::Volume => set_volume(set.weight_kg, set.reps),
            PrMetric::Reps => f64::from(set.reps.unwrap_or(0)),
        }
    }

    /// Whether a set can be a record candidate at all
    #[must_use]
    pub fn is_candidate(set: &SetRecord) -> bool {
        set.is_working()
            && set.weight_kg.is_some_and(|weight| weight > 0.0)
            && set.reps.is_some_and(|reps| reps > 0)
    }

    /// Historical maximum of `metric`, `None` when the population is empty
    ///
    /// Deleted and warmup sets in `history` are ignored.
    pub fn historical_max<'a, I>(&self, history: I, metric: PrMetric) -> Option<f64>
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        history
            .into_iter()
            .filter(|set| set.is_working())
            .map(|set| self.metric_value(set, metric))
            .reduce(f64::max)
    }

    /// Strict personal-record comparison
    ///
    /// Empty history makes any positive value a record. Equality is never a record.
    pub fn is_personal_record<'a, I>(&self, value: f64, history: I, metric: PrMetric) -> bool
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        if value <= 0.0 {
            return false;
        }
        self.historical_max(history, metric)
            .is_none_or(|best| value > best)
    }

    /// Every metric on which `candidate` beats `history`
    ///
    /// `history` is this exercise's earlier sets; the candidate itself is
    /// skipped if present. Ineligible candidates (warmups, deleted sets,
    /// missing weight or reps) qualify for nothing.
    pub fn detect_set_prs<'a, I>(&self, candidate: &SetRecord, history: I) -> Vec<PrMetric>
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        if !Self::is_candidate(candidate) {
            return Vec::new();
        }
        let population = Self::population(candidate, history);
        let records: Vec<PrMetric> = PrMetric::ALL
            .into_iter()
            .filter(|metric| {
                self.is_personal_record(
                    self.metric_value(candidate, *metric),
                    population.iter().copied(),
                    *metric,
                )
            })
            .collect();

        debug!(
            set_id = %candidate.id,
            history = population.len(),
            records = records.len(),
            "Detected personal records"
        );
        records
    }

    /// At most one celebration for a completed set
    ///
    /// With history: the first improved metric in weight, 1RM, volume order.
    /// Without history: a first-meaningful-attempt celebration when the set
    /// clears the weight or reps gate, otherwise nothing.
    pub fn select_celebration<'a, I>(&self, candidate: &SetRecord, history: I) -> Option<Celebration>
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        if !Self::is_candidate(candidate) {
            return None;
        }
        let population = Self::population(candidate, history);

        if population.is_empty() {
            let weight_kg = candidate.weight_kg.unwrap_or(0.0);
            let reps = candidate.reps.unwrap_or(0);
            let meaningful =
                weight_kg >= self.meaningful_min_weight_kg || reps >= self.meaningful_min_reps;
            return meaningful.then_some(Celebration::FirstMeaningfulAttempt { weight_kg, reps });
        }

        PrMetric::CELEBRATION_PRIORITY
            .into_iter()
            .find_map(|metric| {
                let value = self.metric_value(candidate, metric);
                let previous_best = self.historical_max(population.iter().copied(), metric)?;
                (value > previous_best).then_some(Celebration::PersonalRecord {
                    metric,
                    value,
                    previous_best,
                })
            })
    }

    /// Replay sets chronologically and emit every record event
    ///
    /// Each item pairs a set with the instant it counts at (usually its
    /// `completed_at`, falling back to the workout start). Items are stably
    /// sorted by that instant before replay.
    pub fn record_history<'a, I>(&self, sets: I) -> Vec<PrEvent>
    where
        I: IntoIterator<Item = (DateTime<Utc>, &'a SetRecord)>,
    {
        let mut ordered: Vec<(DateTime<Utc>, &SetRecord)> = sets
            .into_iter()
            .filter(|(_, set)| set.is_working())
            .collect();
        ordered.sort_by_key(|(at, _)| *at);

        let mut bests: [Option<f64>; 4] = [None; 4];
        let mut events = Vec::new();

        for (achieved_at, set) in ordered {
            let candidate = Self::is_candidate(set);
            for (slot, metric) in PrMetric::ALL.into_iter().enumerate() {
                let value = self.metric_value(set, metric);
                let previous_best = bests[slot];
                let improved = match previous_best {
                    Some(best) => value > best,
                    None => value > 0.0,
                };
                if candidate && improved {
                    events.push(PrEvent {
                        metric,
                        value,
                        previous_best,
                        set_id: set.id,
                        achieved_at,
                    });
                }
                // A set without this metric (e.g. no weight) leaves no best behind
                if value > 0.0 {
                    bests[slot] = Some(previous_best.map_or(value, |best| best.max(value)));
                }
            }
        }

        events
    }

    /// Events inside the recent-record badge window ending at `now`
    #[must_use]
    pub fn recent_records<'e>(&self, events: &'e [PrEvent], now: DateTime<Utc>) -> Vec<&'e PrEvent> {
        let window_start = days_before(now, self.recent_window_days);
        events
            .iter()
            .filter(|event| event.achieved_at >= window_start && event.achieved_at <= now)
            .collect()
    }

    fn population<'a, I>(candidate: &SetRecord, history: I) -> Vec<&'a SetRecord>
    where
        I: IntoIterator<Item = &'a SetRecord>,
    {
        history
            .into_iter()
            .filter(|set| set.is_working() && set.id != candidate.id)
            .collect()
    }
}
