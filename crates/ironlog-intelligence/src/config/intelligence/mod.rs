// ABOUTME: Intelligence module configuration for workout metrics and analysis
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides type-safe configuration for every calculator in the crate.
//!
//! # Module Structure
//!
//! Configuration is organized into domain-specific modules:
//! - `metrics` - One-rep-max formula, warmup policy, hard-set thresholds
//! - `personal_records` - Recent-record window and first-attempt gate
//! - `training_load` - Load class boundaries and baseline policy
//! - `balance` - Balance window and classification vocabularies
//! - `progression` - Trend window and significance threshold
//! - `streak` - Weekly target and walk limit
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export IRONLOG_ONE_REP_MAX_ALGORITHM=epley
//!    export IRONLOG_STREAK_TARGET_PER_WEEK=4
//!    ```
//!
//! 2. Default values (if env vars not set)
//!
//! There is no global instance: callers load the configuration once and pass
//! it to the calculators they construct.

// Domain configuration modules
pub mod balance;
pub mod error;
pub mod metrics;
pub mod personal_records;
pub mod progression;
pub mod streak;
pub mod training_load;

pub use balance::BalanceConfig;
pub use error::ConfigError;
pub use metrics::{HardSetThresholds, MetricsConfig};
pub use personal_records::PersonalRecordConfig;
pub use progression::ProgressionConfig;
pub use streak::StreakConfig;
pub use training_load::TrainingLoadConfig;

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::balance::MAX_WINDOW_WEEKS;
use crate::constants::effort::{RIR_MAX, RPE_MAX, RPE_MIN};
use crate::constants::personal_records::MAX_RECENT_WINDOW_DAYS;
use crate::constants::streak::MAX_WEEKS_LIMIT;
use crate::constants::training_load::MAX_TRAILING_WEEKS;

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Set-level metric calculation
    pub metrics: MetricsConfig,
    /// Personal record policy
    pub personal_records: PersonalRecordConfig,
    /// Weekly training-load classification
    pub training_load: TrainingLoadConfig,
    /// Muscle and movement-pattern balance
    pub balance: BalanceConfig,
    /// Progression trend detection
    pub progression: ProgressionConfig,
    /// Weekly adherence streaks
    pub streak: StreakConfig,
}

impl IntelligenceConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Apply environment variable overrides
        config = config.apply_env_overrides()?;

        // Validate the final configuration
        config.validate()?;

        debug!(
            one_rep_max = %config.metrics.one_rep_max_algorithm,
            streak_target = config.streak.target_per_week,
            "Loaded intelligence configuration"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hard_set = &self.metrics.hard_set;
        if !(RPE_MIN..=RPE_MAX).contains(&hard_set.min_rpe) {
            return Err(ConfigError::ValueOutOfRange(
                "hard_set.min_rpe must be between 1 and 10",
            ));
        }
        if hard_set.max_rir > RIR_MAX {
            return Err(ConfigError::ValueOutOfRange(
                "hard_set.max_rir must be between 0 and 5",
            ));
        }

        let records = &self.personal_records;
        if !(1..=MAX_RECENT_WINDOW_DAYS).contains(&records.recent_window_days) {
            return Err(ConfigError::ValueOutOfRange(
                "recent_window_days must be between 1 and 3650",
            ));
        }
        if records.meaningful_min_weight_kg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "meaningful_min_weight_kg must not be negative",
            ));
        }

        self.validate_training_load()?;
        self.validate_balance()?;

        if self.progression.window_size < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "progression window_size must be at least 2",
            ));
        }
        if self.progression.significance_threshold < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "progression significance_threshold must not be negative",
            ));
        }

        if self.streak.target_per_week == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "streak target_per_week must be at least 1",
            ));
        }
        if !(1..=MAX_WEEKS_LIMIT).contains(&self.streak.max_weeks) {
            return Err(ConfigError::ValueOutOfRange(
                "streak max_weeks must be between 1 and 520",
            ));
        }

        Ok(())
    }

    fn validate_training_load(&self) -> Result<(), ConfigError> {
        let load = &self.training_load;
        if load.light_upper_ratio <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "light_upper_ratio must be positive",
            ));
        }
        if load.light_upper_ratio >= load.heavy_lower_ratio {
            return Err(ConfigError::InvalidRange(
                "light_upper_ratio must be < heavy_lower_ratio",
            ));
        }
        if !(0.0..=1.0).contains(&load.min_rpe_coverage) {
            return Err(ConfigError::ValueOutOfRange(
                "min_rpe_coverage must be between 0 and 1",
            ));
        }
        if !(1..=MAX_TRAILING_WEEKS).contains(&load.trailing_weeks) {
            return Err(ConfigError::ValueOutOfRange(
                "trailing_weeks must be between 1 and 520",
            ));
        }
        Ok(())
    }

    fn validate_balance(&self) -> Result<(), ConfigError> {
        let balance = &self.balance;
        if !(1..=MAX_WINDOW_WEEKS).contains(&balance.window_weeks) {
            return Err(ConfigError::ValueOutOfRange(
                "balance window_weeks must be between 1 and 520",
            ));
        }
        if balance.push_keywords.is_empty() || balance.pull_keywords.is_empty() {
            return Err(ConfigError::MissingField("push_keywords/pull_keywords"));
        }
        if balance.upper_body_muscles.is_empty() || balance.lower_body_muscles.is_empty() {
            return Err(ConfigError::MissingField(
                "upper_body_muscles/lower_body_muscles",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Helper for comma-separated vocabulary overrides
    fn apply_env_list(env_var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .split(',')
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect();
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Metrics overrides
        Self::apply_env_var(
            "IRONLOG_ONE_REP_MAX_ALGORITHM",
            &mut self.metrics.one_rep_max_algorithm,
        )?;
        Self::apply_env_var("IRONLOG_EXCLUDE_WARMUPS", &mut self.metrics.exclude_warmups)?;
        Self::apply_env_var(
            "IRONLOG_HARD_SET_MIN_RPE",
            &mut self.metrics.hard_set.min_rpe,
        )?;
        Self::apply_env_var(
            "IRONLOG_HARD_SET_MAX_RIR",
            &mut self.metrics.hard_set.max_rir,
        )?;

        // Personal record overrides
        Self::apply_env_var(
            "IRONLOG_PR_RECENT_WINDOW_DAYS",
            &mut self.personal_records.recent_window_days,
        )?;

        // Training load overrides
        Self::apply_env_var(
            "IRONLOG_LOAD_LIGHT_UPPER_RATIO",
            &mut self.training_load.light_upper_ratio,
        )?;
        Self::apply_env_var(
            "IRONLOG_LOAD_HEAVY_LOWER_RATIO",
            &mut self.training_load.heavy_lower_ratio,
        )?;
        Self::apply_env_var(
            "IRONLOG_LOAD_MIN_RPE_COVERAGE",
            &mut self.training_load.min_rpe_coverage,
        )?;
        Self::apply_env_var(
            "IRONLOG_LOAD_TRAILING_WEEKS",
            &mut self.training_load.trailing_weeks,
        )?;
        Self::apply_env_var(
            "IRONLOG_LOAD_INCLUDE_CURRENT_WEEK",
            &mut self.training_load.include_current_week,
        )?;

        // Balance overrides
        Self::apply_env_var(
            "IRONLOG_BALANCE_WINDOW_WEEKS",
            &mut self.balance.window_weeks,
        )?;
        Self::apply_env_list("IRONLOG_BALANCE_PUSH_KEYWORDS", &mut self.balance.push_keywords);
        Self::apply_env_list("IRONLOG_BALANCE_PULL_KEYWORDS", &mut self.balance.pull_keywords);

        // Progression overrides
        Self::apply_env_var(
            "IRONLOG_PROGRESSION_WINDOW_SIZE",
            &mut self.progression.window_size,
        )?;
        Self::apply_env_var(
            "IRONLOG_PROGRESSION_THRESHOLD",
            &mut self.progression.significance_threshold,
        )?;

        // Streak overrides
        Self::apply_env_var(
            "IRONLOG_STREAK_TARGET_PER_WEEK",
            &mut self.streak.target_per_week,
        )?;
        Self::apply_env_var("IRONLOG_STREAK_MAX_WEEKS", &mut self.streak.max_weeks)?;

        Ok(self)
    }
}
