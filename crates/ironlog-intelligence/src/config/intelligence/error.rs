// ABOUTME: Validation failures for calculator and aggregator settings
// ABOUTME: Raised by IntelligenceConfig::validate and by malformed IRONLOG_* overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Why an intelligence configuration was refused
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two boundaries that must be ordered are not
    #[error("thresholds out of order: {0}")]
    InvalidRange(&'static str),

    /// A classification vocabulary is empty
    #[error("empty vocabulary: {0}")]
    MissingField(&'static str),

    /// An environment override could not be parsed
    #[error("cannot parse override: {0}")]
    Parse(String),

    /// A numeric setting lies outside its allowed bounds
    #[error("setting out of bounds: {0}")]
    ValueOutOfRange(&'static str),
}
