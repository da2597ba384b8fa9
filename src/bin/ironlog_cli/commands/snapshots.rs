// ABOUTME: Snapshot file commands for ironlog-cli
// ABOUTME: Migrates snapshot files to the current schema and verifies them against store rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use ironlog::{
    config::AppConfig,
    errors::AppResult,
    ingest::ingest,
    intelligence::MetricsCalculator,
    snapshot::{MigrationChain, WorkoutSnapshot},
    store::{InMemoryRecordStore, RecordStore},
};
use serde_json::Value;
use tracing::info;

use crate::helpers::display::display_verification;
use crate::helpers::output::{read_document, write_json};

fn source_version(document: &Value) -> String {
    document
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or("<missing>")
        .to_owned()
}

/// Migrate a snapshot file and write the current-version document
pub async fn migrate(file: &Path, output: Option<&Path>) -> AppResult<()> {
    let document: Value = serde_json::from_str(&read_document(file).await?)?;
    let from = source_version(&document);

    let chain = MigrationChain::standard();
    let migrated = chain.migrate(document)?;
    // Round-trip through the canonical type so only valid documents are written
    let snapshot: WorkoutSnapshot = serde_json::from_value(migrated)?;

    write_json(&snapshot, output).await?;
    info!(from = %from, to = chain.target(), "Migrated snapshot file");
    Ok(())
}

/// Check that a snapshot migrates, decomposes into valid records, and yields metrics
pub async fn verify(config: &AppConfig, file: &Path) -> AppResult<()> {
    let document: Value = serde_json::from_str(&read_document(file).await?)?;
    let from = source_version(&document);
    let snapshot = WorkoutSnapshot::from_value(document)?;

    // A scratch store applies the same integrity rules as the real one
    let scratch = InMemoryRecordStore::new();
    ingest(&scratch, snapshot.clone()).await?;
    let records = scratch.record_count().await?;

    let summary = MetricsCalculator::from_config(&config.intelligence.metrics)
        .workout_summary(&snapshot.to_workout());

    display_verification(&from, &snapshot, &summary, records);
    Ok(())
}
