// ABOUTME: Muscle and movement-pattern balance configuration
// ABOUTME: Trailing window and the keyword vocabularies used for push/pull and upper/lower
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Balance Configuration
//!
//! Classification is a case-insensitive substring match against free-text
//! labels. The vocabularies are a starting point rather than a taxonomy:
//! labels such as "core" or "full body" match neither bucket and are only
//! counted in the per-muscle and per-pattern breakdowns.

use serde::{Deserialize, Serialize};

use crate::constants::balance::{
    LOWER_BODY_MUSCLES, PULL_KEYWORDS, PUSH_KEYWORDS, UPPER_BODY_MUSCLES, WINDOW_WEEKS,
};

/// Balance aggregator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Trailing weeks of workouts considered
    pub window_weeks: i64,
    /// Movement-pattern keywords classified as push
    pub push_keywords: Vec<String>,
    /// Movement-pattern keywords classified as pull
    pub pull_keywords: Vec<String>,
    /// Muscle-group labels classified as upper body
    pub upper_body_muscles: Vec<String>,
    /// Muscle-group labels classified as lower body
    pub lower_body_muscles: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_owned()).collect()
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            window_weeks: WINDOW_WEEKS,
            push_keywords: owned(PUSH_KEYWORDS),
            pull_keywords: owned(PULL_KEYWORDS),
            upper_body_muscles: owned(UPPER_BODY_MUSCLES),
            lower_body_muscles: owned(LOWER_BODY_MUSCLES),
        }
    }
}
