// ABOUTME: Structured logging setup for the Ironlog library and CLI
// ABOUTME: Configures log level, output format, and stderr writer for tracing subscribers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Logging configuration with structured output
//!
//! Log lines go to stderr so that stdout stays clean for exported documents.

use std::env;
use std::io;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;

/// How and where tracing output is written
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, usually a bare level such as `warn`
    pub level: String,
    /// Line layout on stderr
    pub format: LogFormat,
    /// Append `file:line` to every event
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Reported in the startup event
    pub service_name: String,
    /// Crate version reported in the startup event
    pub service_version: String,
}

/// Layout of each log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for machine consumption
    Json,
    /// Multi-line human output
    Pretty,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to compact
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_spans: false,
            service_name: service_names::IRONLOG.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_SPANS` and `SERVICE_NAME`
    #[must_use]
    pub fn from_env() -> Self {
        let format = env::var("LOG_FORMAT")
            .map(|value| LogFormat::from_str_or_default(&value))
            .unwrap_or(LogFormat::Compact);

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
            format,
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::IRONLOG.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// Same configuration with verbose output forced on
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.level = "debug".into();
        self
    }

    /// Same configuration tagged with another service name
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        // A bare level in `level` also becomes the default for every other target
        let mut filter = EnvFilter::new(&self.level);
        if let Ok(directive) = "sqlx=warn".parse() {
            filter = filter.add_directive(directive);
        }
        for target in ["ironlog", "ironlog_intelligence"] {
            match format!("{target}={}", self.level).parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(_) => filter = filter.add_directive(Level::INFO.into()),
            }
        }
        filter
    }

    /// Install this configuration as the process-wide subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();
                registry.with(layer).try_init()?;
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .pretty()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);
                registry.with(layer).try_init()?;
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service = %self.service_name,
            version = %self.service_version,
            level = %self.level,
            format = ?self.format,
            location = self.include_location,
            spans = self.include_spans,
            "Tracing subscriber installed"
        );
    }
}

/// Install a subscriber configured purely from the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    let config = LoggingConfig::from_env();
    config.init()
}

/// Structured events shared by the CLI commands
pub struct AppLogger;

impl AppLogger {
    /// Log the outcome of a command against the record store
    pub fn log_store_operation(operation: &str, records: usize, success: bool, elapsed: Duration) {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if success {
            info!(
                store.operation = %operation,
                store.records = records,
                store.duration_ms = duration_ms,
                "Store operation"
            );
        } else {
            warn!(
                store.operation = %operation,
                store.records = records,
                store.duration_ms = duration_ms,
                "Store operation failed"
            );
        }
    }

    /// Log a rejected snapshot document
    pub fn log_rejected_document(source: &str, code: &str, message: &str) {
        warn!(
            document.source = %source,
            error.code = %code,
            error.message = %message,
            "Rejected snapshot document"
        );
    }
}
