// ABOUTME: Streak calculator configuration
// ABOUTME: Weekly workout target and the maximum number of weeks walked back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::streak::{MAX_WEEKS, TARGET_PER_WEEK};

/// Streak calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Workouts per week that extend a streak
    pub target_per_week: u32,
    /// Weeks examined before the walk stops
    pub max_weeks: u32,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            target_per_week: TARGET_PER_WEEK,
            max_weeks: MAX_WEEKS,
        }
    }
}
