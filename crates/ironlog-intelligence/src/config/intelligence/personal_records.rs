// ABOUTME: Personal record policy configuration
// ABOUTME: Recent-record badge window and the first-meaningful-attempt gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::personal_records::{
    MEANINGFUL_MIN_REPS, MEANINGFUL_MIN_WEIGHT_KG, RECENT_WINDOW_DAYS,
};

/// Personal record policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecordConfig {
    /// Days a record stays highlighted as recent
    pub recent_window_days: i64,
    /// A first attempt is celebrated at or above this weight...
    pub meaningful_min_weight_kg: f64,
    /// ...or at or above this many reps
    pub meaningful_min_reps: u32,
}

impl Default for PersonalRecordConfig {
    fn default() -> Self {
        Self {
            recent_window_days: RECENT_WINDOW_DAYS,
            meaningful_min_weight_kg: MEANINGFUL_MIN_WEIGHT_KG,
            meaningful_min_reps: MEANINGFUL_MIN_REPS,
        }
    }
}
