// ABOUTME: Training-load classification configuration
// ABOUTME: Load class boundaries, RPE coverage gate, and trailing baseline policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::training_load::{
    HEAVY_LOWER_RATIO, LIGHT_UPPER_RATIO, MIN_RPE_COVERAGE, TRAILING_WEEKS,
};

/// Training-load classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingLoadConfig {
    /// Ratios strictly below this are light
    pub light_upper_ratio: f64,
    /// Ratios strictly above this are heavy
    pub heavy_lower_ratio: f64,
    /// Share of working sets carrying RPE before RPE metrics are reported
    pub min_rpe_coverage: f64,
    /// Weeks averaged for the baseline
    pub trailing_weeks: usize,
    /// Whether the current week is part of its own baseline
    pub include_current_week: bool,
}

impl Default for TrainingLoadConfig {
    fn default() -> Self {
        Self {
            light_upper_ratio: LIGHT_UPPER_RATIO,
            heavy_lower_ratio: HEAVY_LOWER_RATIO,
            min_rpe_coverage: MIN_RPE_COVERAGE,
            trailing_weeks: TRAILING_WEEKS,
            include_current_week: false,
        }
    }
}
