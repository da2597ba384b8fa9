// ABOUTME: Main library entry point for the Ironlog workout engine
// ABOUTME: Versioned record store, canonical snapshots, ingestion, and analytics export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog
//!
//! A local-first derived-metrics engine for resistance training. Every
//! analytical value (volume, estimated one-rep max, personal records, training
//! load, progression, streaks) is recomputed on read from an append-only log of
//! immutable set, exercise and workout records. Nothing computed is ever
//! persisted.
//!
//! ## Architecture
//!
//! - **Store**: append-only [`store::RecordStore`] with in-memory and `SQLite` backends
//! - **Snapshot**: versioned, self-contained JSON of one completed workout
//! - **Ingest**: migrates and normalizes snapshots into store records
//! - **Export**: analytics document built from materialized workouts
//! - **Intelligence**: pure calculators and aggregators (re-exported crate)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ironlog::config::AppConfig;
//! use ironlog::errors::AppResult;
//! use ironlog::store::{RecordStore, SqliteRecordStore};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let store = SqliteRecordStore::open(&config.database_url.to_connection_string()).await?;
//!     let workouts = store.workouts(false).await?;
//!     println!("{} workouts on record", workouts.len());
//!     Ok(())
//! }
//! ```

/// Environment and intelligence configuration
pub mod config;

/// Analytics export document
pub mod export;

/// Snapshot ingestion into the record store
pub mod ingest;

/// Structured logging setup
pub mod logging;

/// Canonical workout snapshots and schema migration
pub mod snapshot;

/// Append-only versioned record store
pub mod store;

pub use ironlog_core::{constants, errors, models};

/// Derived-metrics engine
pub use ironlog_intelligence as intelligence;
