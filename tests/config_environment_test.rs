// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates environment overrides, database URL parsing, and invalid-value rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use ironlog::config::{AppConfig, DatabaseUrl, LogLevel, DEFAULT_DATABASE_URL};
use ironlog::errors::ErrorCode;
use ironlog::intelligence::OneRepMaxAlgorithm;
use ironlog::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "IRONLOG_DATABASE_URL",
    "IRONLOG_UTC_OFFSET_MINUTES",
    "IRONLOG_ONE_REP_MAX_ALGORITHM",
    "IRONLOG_STREAK_TARGET_PER_WEEK",
    "IRONLOG_EXCLUDE_WARMUPS",
    "IRONLOG_BALANCE_WINDOW_WEEKS",
    "IRONLOG_PR_RECENT_WINDOW_DAYS",
    "IRONLOG_LOAD_TRAILING_WEEKS",
    "IRONLOG_STREAK_MAX_WEEKS",
    "LOG_FORMAT",
    "RUST_LOG",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

// Tests for public configuration types

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info); // Default fallback
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/ironlog.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/ironlog.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:///var/lib/ironlog.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("/var/lib/ironlog.db")
        }
    );
    assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());
    assert!(DatabaseUrl::parse_url(":memory:").unwrap().is_memory());
    assert_eq!(
        DatabaseUrl::parse_url("workouts.db").unwrap().to_connection_string(),
        "sqlite:workouts.db"
    );

    let error = DatabaseUrl::parse_url("postgresql://localhost/ironlog").unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(DatabaseUrl::parse_url("  ").is_err());
}

// Tests that read the process environment

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();

    assert_eq!(
        config.database_url,
        DatabaseUrl::parse_url(DEFAULT_DATABASE_URL).unwrap()
    );
    assert_eq!(config.utc_offset_minutes, 0);
    assert_eq!(
        config.intelligence.metrics.one_rep_max_algorithm,
        OneRepMaxAlgorithm::Brzycki
    );
    assert_eq!(config.intelligence.streak.target_per_week, 3);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("IRONLOG_DATABASE_URL", "sqlite::memory:");
    env::set_var("IRONLOG_UTC_OFFSET_MINUTES", "-300");
    env::set_var("IRONLOG_ONE_REP_MAX_ALGORITHM", "epley");
    env::set_var("IRONLOG_STREAK_TARGET_PER_WEEK", "4");
    env::set_var("IRONLOG_EXCLUDE_WARMUPS", "false");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert!(config.database_url.is_memory());
    assert_eq!(config.utc_offset_minutes, -300);
    assert_eq!(config.utc_offset().unwrap().local_minus_utc(), -300 * 60);
    assert_eq!(
        config.intelligence.metrics.one_rep_max_algorithm,
        OneRepMaxAlgorithm::Epley
    );
    assert_eq!(config.intelligence.streak.target_per_week, 4);
    assert!(!config.intelligence.metrics.exclude_warmups);
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    let cases = [
        ("IRONLOG_UTC_OFFSET_MINUTES", "east"),
        ("IRONLOG_UTC_OFFSET_MINUTES", "2000"),
        ("IRONLOG_STREAK_TARGET_PER_WEEK", "0"),
        ("IRONLOG_ONE_REP_MAX_ALGORITHM", "lombardi"),
        ("IRONLOG_DATABASE_URL", "redis://localhost"),
        ("IRONLOG_BALANCE_WINDOW_WEEKS", "2000000000000000"),
        ("IRONLOG_PR_RECENT_WINDOW_DAYS", "3651"),
        ("IRONLOG_LOAD_TRAILING_WEEKS", "18446744073709551615"),
        ("IRONLOG_STREAK_MAX_WEEKS", "521"),
    ];

    for (var, value) in cases {
        clear_env();
        env::set_var(var, value);
        let result = AppConfig::from_env();
        clear_env();

        let error = result.unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigError, "{var}={value}");
    }
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_env();
    let defaults = LoggingConfig::from_env();
    assert_eq!(defaults.level, "warn");
    assert_eq!(defaults.format, LogFormat::Compact);

    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
}

#[test]
fn test_builder_overrides() {
    let config = AppConfig::default()
        .with_database_url(DatabaseUrl::Memory)
        .with_utc_offset_minutes(60);

    assert!(config.database_url.is_memory());
    assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 3600);
    assert!(AppConfig::default()
        .with_utc_offset_minutes(24 * 60)
        .utc_offset()
        .is_err());
}
