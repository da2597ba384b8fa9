// ABOUTME: Progression detector configuration
// ABOUTME: Trailing window length and the normalized slope that counts as a trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::progression::{SIGNIFICANCE_THRESHOLD, WINDOW_SIZE};

/// Progression detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Most recent points fitted
    pub window_size: usize,
    /// Slope per point, in units of the window's first value
    pub significance_threshold: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            significance_threshold: SIGNIFICANCE_THRESHOLD,
        }
    }
}
