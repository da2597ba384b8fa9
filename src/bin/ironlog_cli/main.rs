// ABOUTME: Ironlog CLI - command-line tool for the workout record store and analytics
// ABOUTME: Imports snapshots, exports analytics, migrates and verifies snapshot files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Import canonical snapshots (any supported schema version)
//! ironlog-cli import snapshots/*.json
//!
//! # Write the analytics export document
//! ironlog-cli export --output analytics.json
//!
//! # Bring an old snapshot file to the current schema
//! ironlog-cli migrate legacy.json
//!
//! # Check a snapshot file without touching the store
//! ironlog-cli verify workout.json
//!
//! # Show the weekly streak against a custom target
//! ironlog-cli streak --target 4
//!
//! # Show every version of one set
//! ironlog-cli history 6f1c1c2e-8d0c-4b8f-9d8e-3f7d1f2a9b10
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ironlog::{
    config::{AppConfig, DatabaseUrl},
    constants::service_names,
    store::SqliteRecordStore,
};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "ironlog-cli",
    about = "Ironlog workout record store and analytics CLI",
    long_about = "Command-line tool for importing canonical workout snapshots, exporting derived analytics, and migrating snapshot files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Local calendar offset from UTC in minutes
    #[arg(long, global = true, allow_negative_numbers = true)]
    utc_offset_minutes: Option<i32>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Import snapshot files into the record store
    Import {
        /// Snapshot JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Export the analytics document
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Migrate a snapshot file to the current schema version
    Migrate {
        /// Snapshot JSON file
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Verify a snapshot file and print its derived metrics
    Verify {
        /// Snapshot JSON file
        file: PathBuf,
    },

    /// Show the weekly adherence streak
    Streak {
        /// Workouts per week (defaults to the configured target)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        target: Option<u32>,
    },

    /// Show the version chain of one set
    History {
        /// Any version id in the chain
        set_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.database_url.as_deref() {
        config = config.with_database_url(DatabaseUrl::parse_url(url)?);
    }
    if let Some(minutes) = cli.utc_offset_minutes {
        config = config.with_utc_offset_minutes(minutes);
    }

    let mut logging = config.logging.clone().with_service_name(service_names::IRONLOG_CLI);
    if cli.verbose {
        logging = logging.verbose();
    }
    logging.init()?;
    info!("Ironlog CLI");

    let offset = config.utc_offset()?;

    match cli.command {
        Command::Migrate { file, output } => {
            commands::snapshots::migrate(&file, output.as_deref()).await?;
        }
        Command::Verify { file } => {
            commands::snapshots::verify(&config, &file).await?;
        }
        Command::Import { files } => {
            let store = open_store(&config).await?;
            commands::records::import(&store, &files).await?;
        }
        Command::History { set_id } => {
            let store = open_store(&config).await?;
            commands::records::history(&store, set_id).await?;
        }
        Command::Export { output } => {
            let store = open_store(&config).await?;
            commands::analytics::export(&store, &config, offset, output.as_deref()).await?;
        }
        Command::Streak { target } => {
            let store = open_store(&config).await?;
            commands::analytics::streak(&store, &config, offset, target).await?;
        }
    }

    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<SqliteRecordStore> {
    if let Some(dir) = config.database_url.parent_dir() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }
    let url = config.database_url.to_connection_string();
    debug!("Connecting to database: {url}");
    let store = SqliteRecordStore::open(&url).await?;
    Ok(store)
}
