// ABOUTME: Configuration module for the Ironlog library and CLI
// ABOUTME: Environment-driven store location, calendar offset, logging, and calculator settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! [`AppConfig::from_env`] is the single entry point; calculator settings come
//! from [`IntelligenceConfig::load`](crate::intelligence::IntelligenceConfig::load).

/// Environment-based configuration
pub mod environment;

pub use environment::{AppConfig, DatabaseUrl, LogLevel, DEFAULT_DATABASE_URL};
pub use crate::intelligence::IntelligenceConfig;
