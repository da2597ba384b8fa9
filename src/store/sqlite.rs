// ABOUTME: SQLite-backed record store persisting the append-only log
// ABOUTME: Replays the log into a ledger on open; key constraints back compare-and-append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` record store
//!
//! The log lives in `record_log` as JSON payloads in append order. Each
//! supersession also writes a row to `supersessions`, whose primary key on the
//! superseded id makes a second successor impossible even across processes.
//! Reads are served from a ledger rebuilt from the log when the store opens.

use std::slice;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{Ledger, Record, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::{SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;

const MEMORY_URLS: &[&str] = &["sqlite::memory:", ":memory:", "sqlite://:memory:"];

/// Durable store on a `SQLite` database
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    ledger: Arc<RwLock<Ledger>>,
}

fn storage_error(context: &str, error: sqlx::Error) -> AppError {
    AppError::storage(format!("{context}: {error}")).with_source(error)
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database at `database_url` and replay its log
    ///
    /// Accepts `sqlite:<path>` URLs and `sqlite::memory:`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the database cannot be opened or the log
    /// contains a record that no longer validates.
    pub async fn open(database_url: &str) -> AppResult<Self> {
        let in_memory = MEMORY_URLS.contains(&database_url);
        let url = if in_memory { "sqlite::memory:" } else { database_url };
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| storage_error("invalid database url", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to an in-memory database is a separate database
        let max_connections = if in_memory { 1 } else { 4 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| storage_error("failed to open database", e))?;

        let store = Self {
            pool,
            ledger: Arc::new(RwLock::new(Ledger::new())),
        };
        store.migrate().await?;
        store.replay().await?;
        Ok(store)
    }

    /// Create the log tables
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when a statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS record_log (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                record_key TEXT UNIQUE,
                workout_id TEXT,
                payload TEXT NOT NULL,
                appended_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("failed to create record_log", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS supersessions (
                previous_id TEXT PRIMARY KEY,
                set_id TEXT NOT NULL UNIQUE,
                seq INTEGER NOT NULL REFERENCES record_log(seq)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("failed to create supersessions", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_record_log_workout ON record_log(workout_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("failed to create record_log index", e))?;

        Ok(())
    }

    async fn replay(&self) -> AppResult<()> {
        let rows = sqlx::query("SELECT seq, payload FROM record_log ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("failed to read record_log", e))?;

        let mut ledger = self.ledger.write().await;
        for row in rows {
            let seq: i64 = row
                .try_get("seq")
                .map_err(|e| storage_error("malformed record_log row", e))?;
            let payload: String = row
                .try_get("payload")
                .map_err(|e| storage_error("malformed record_log row", e))?;
            let record: Record = serde_json::from_str(&payload).map_err(|e| {
                AppError::storage(format!("record {seq} is not a valid record: {e}"))
            })?;
            ledger.append(record).map_err(|e| {
                AppError::storage(format!("record {seq} does not replay: {}", e.message))
            })?;
        }

        info!(records = ledger.len(), "Replayed record log");
        Ok(())
    }

    /// Write `records` in one transaction; a failure rolls every row back
    async fn persist(&self, records: &[Record]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("failed to begin transaction", e))?;

        for record in records {
            insert_record(&mut tx, record).await?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("failed to commit records", e))
    }
}

async fn insert_record(tx: &mut Transaction<'_, Sqlite>, record: &Record) -> AppResult<()> {
    let payload = serde_json::to_string(record)?;
    let seq: i64 = sqlx::query(
        r"
        INSERT INTO record_log (kind, record_key, workout_id, payload, appended_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING seq
        ",
    )
    .bind(record.kind().as_str())
    .bind(record.unique_key())
    .bind(record.workout_id().map(|id| id.to_string()))
    .bind(&payload)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await
    .and_then(|row| row.try_get("seq"))
    .map_err(|e| constraint_error(record, e))?;

    if let Record::Set(SetRecord {
        id,
        previous_version_id: Some(previous_id),
        ..
    }) = record
    {
        sqlx::query("INSERT INTO supersessions (previous_id, set_id, seq) VALUES (?, ?, ?)")
            .bind(previous_id.to_string())
            .bind(id.to_string())
            .bind(seq)
            .execute(&mut **tx)
            .await
            .map_err(|e| constraint_error(record, e))?;
    }
    Ok(())
}

/// Map a constraint violation written by another process onto the store's error codes
fn constraint_error(record: &Record, error: sqlx::Error) -> AppError {
    let unique = matches!(&error, sqlx::Error::Database(db) if db.is_unique_violation());
    if !unique {
        return storage_error("failed to append record", error);
    }
    match record {
        Record::Set(SetRecord {
            previous_version_id: Some(previous_id),
            ..
        }) => AppError::version_conflict(format!(
            "set version {previous_id} was superseded concurrently"
        ))
        .with_resource_id(previous_id.to_string()),
        _ => AppError::already_exists(format!(
            "{} {}",
            record.kind(),
            record.unique_key().unwrap_or_default()
        )),
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn append(&self, record: Record) -> AppResult<()> {
        let kind = record.kind();
        let mut ledger = self.ledger.write().await;
        if let Err(error) = ledger.validate(&record) {
            warn!(%kind, code = ?error.code, "Rejected record: {}", error.message);
            return Err(error);
        }
        if let Err(error) = self.persist(slice::from_ref(&record)).await {
            warn!(%kind, code = ?error.code, "Failed to persist record: {}", error.message);
            return Err(error);
        }
        ledger.append(record)?;
        debug!(%kind, records = ledger.len(), "Appended record");
        Ok(())
    }

    async fn append_batch(&self, records: Vec<Record>) -> AppResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut ledger = self.ledger.write().await;
        let staged = match ledger.staged(&records) {
            Ok(staged) => staged,
            Err(error) => {
                warn!(batch = records.len(), code = ?error.code, "Rejected batch: {}", error.message);
                return Err(error);
            }
        };
        if let Err(error) = self.persist(&records).await {
            warn!(batch = records.len(), code = ?error.code, "Failed to persist batch: {}", error.message);
            return Err(error);
        }
        *ledger = staged;
        debug!(batch = records.len(), records = ledger.len(), "Appended batch");
        Ok(())
    }

    async fn workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        Ok(self.ledger.read().await.workout(workout_id))
    }

    async fn workouts(&self, include_deleted: bool) -> AppResult<Vec<Workout>> {
        Ok(self.ledger.read().await.workouts(include_deleted))
    }

    async fn set_history(&self, set_id: Uuid) -> AppResult<Vec<SetRecord>> {
        self.ledger.read().await.set_history(set_id)
    }

    async fn snapshots(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutSnapshot>> {
        Ok(self.ledger.read().await.snapshots(workout_id))
    }

    async fn latest_snapshot(&self, workout_id: Uuid) -> AppResult<Option<WorkoutSnapshot>> {
        Ok(self.ledger.read().await.latest_snapshot(workout_id))
    }

    async fn record_count(&self) -> AppResult<usize> {
        Ok(self.ledger.read().await.len())
    }
}
