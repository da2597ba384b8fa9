// ABOUTME: In-memory record store backed by a shared ledger
// ABOUTME: Writers serialize on the ledger's write guard; used by tests and one-shot analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Ledger, Record, RecordStore};
use crate::errors::AppResult;
use crate::models::{SetRecord, Workout};
use crate::snapshot::WorkoutSnapshot;

/// Volatile store; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryRecordStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append(&self, record: Record) -> AppResult<()> {
        let kind = record.kind();
        let mut ledger = self.ledger.write().await;
        match ledger.append(record) {
            Ok(()) => {
                debug!(%kind, records = ledger.len(), "Appended record");
                Ok(())
            }
            Err(error) => {
                warn!(%kind, code = ?error.code, "Rejected record: {}", error.message);
                Err(error)
            }
        }
    }

    async fn append_batch(&self, records: Vec<Record>) -> AppResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut ledger = self.ledger.write().await;
        match ledger.append_all(&records) {
            Ok(()) => {
                debug!(batch = records.len(), records = ledger.len(), "Appended batch");
                Ok(())
            }
            Err(error) => {
                warn!(batch = records.len(), code = ?error.code, "Rejected batch: {}", error.message);
                Err(error)
            }
        }
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
