// ABOUTME: Environment configuration for the Ironlog store, calendar offset, and logging
// ABOUTME: Reads IRONLOG_* variables with typed parsing and falls back to local defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::{info, Level};

use crate::errors::{AppError, AppResult};
use crate::intelligence::calendar::offset_from_minutes;
use crate::intelligence::IntelligenceConfig;
use crate::logging::LoggingConfig;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/ironlog.db";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// `sqlite:<path>`, `sqlite::memory:` and bare file paths are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an empty URL or another database scheme.
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("database url must not be empty"));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
            if path_str == ":memory:" {
                return Ok(Self::Memory);
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if s == ":memory:" {
            return Ok(Self::Memory);
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "unsupported database url '{s}', only sqlite is supported"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to a connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Directory that must exist before the database file can be created
    #[must_use]
    pub fn parent_dir(&self) -> Option<&Path> {
        match self {
            Self::SQLite { path } => path.parent().filter(|dir| !dir.as_os_str().is_empty()),
            Self::Memory => None,
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Record store location
    pub database_url: DatabaseUrl,
    /// Offset applied to UTC instants when grouping by local calendar week
    pub utc_offset_minutes: i32,
    /// Logging setup
    pub logging: LoggingConfig,
    /// Calculator and aggregator configuration
    pub intelligence: IntelligenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DatabaseUrl::SQLite {
                path: PathBuf::from("./data/ironlog.db"),
            },
            utc_offset_minutes: 0,
            logging: LoggingConfig::default(),
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `IRONLOG_DATABASE_URL` | `sqlite:./data/ironlog.db` |
    /// | `IRONLOG_UTC_OFFSET_MINUTES` | `0` |
    /// | `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION` | see [`LoggingConfig::from_env`] |
    /// | `IRONLOG_*` intelligence overrides | see [`IntelligenceConfig::load`] |
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable cannot be parsed or the resulting
    /// configuration is invalid.
    pub fn from_env() -> AppResult<Self> {
        let database_url = DatabaseUrl::parse_url(&env_var_or("IRONLOG_DATABASE_URL", DEFAULT_DATABASE_URL))?;

        let offset_raw = env_var_or("IRONLOG_UTC_OFFSET_MINUTES", "0");
        let utc_offset_minutes: i32 = offset_raw.trim().parse().map_err(|_| {
            AppError::config(format!("Invalid IRONLOG_UTC_OFFSET_MINUTES '{offset_raw}'"))
        })?;

        let intelligence = IntelligenceConfig::load()
            .map_err(|e| AppError::config(e.to_string()).with_source(e))?;

        let config = Self {
            database_url,
            utc_offset_minutes,
            logging: LoggingConfig::from_env(),
            intelligence,
        };
        config
            .utc_offset()
            .map_err(|e| AppError::config(e.message.clone()).with_source(e))?;

        info!(
            database = %config.database_url,
            utc_offset_minutes = config.utc_offset_minutes,
            "Loaded configuration from environment"
        );
        Ok(config)
    }

    /// Local offset for calendar weeks
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the offset is beyond +/- 24 hours.
    pub fn utc_offset(&self) -> AppResult<FixedOffset> {
        offset_from_minutes(self.utc_offset_minutes)
    }

    /// Override the database location
    #[must_use]
    pub fn with_database_url(mut self, database_url: DatabaseUrl) -> Self {
        self.database_url = database_url;
        self
    }

    /// Override the calendar offset
    #[must_use]
    pub const fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }
}

/// Read an environment variable or fall back to a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
