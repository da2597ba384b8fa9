// ABOUTME: Metrics configuration for set-level calculations
// ABOUTME: Selects the one-rep-max formula, warmup policy, and hard-set thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::algorithms::OneRepMaxAlgorithm;
use crate::constants::effort::{HARD_SET_MAX_RIR, HARD_SET_MIN_RPE};

/// Metrics Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Formula used for every estimated one-rep max
    #[serde(default)]
    pub one_rep_max_algorithm: OneRepMaxAlgorithm,
    /// Whether volume and maxima skip warmup sets
    pub exclude_warmups: bool,
    /// Hard-set classification thresholds
    pub hard_set: HardSetThresholds,
}

/// A working set is hard when either threshold is met
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardSetThresholds {
    /// RPE at or above which a set is hard
    pub min_rpe: f64,
    /// RIR at or below which a set is hard
    pub max_rir: u8,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            one_rep_max_algorithm: OneRepMaxAlgorithm::default(),
            exclude_warmups: true,
            hard_set: HardSetThresholds::default(),
        }
    }
}

impl Default for HardSetThresholds {
    fn default() -> Self {
        Self {
            min_rpe: HARD_SET_MIN_RPE,
            max_rir: HARD_SET_MAX_RIR,
        }
    }
}
