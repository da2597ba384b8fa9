// ABOUTME: Record store commands for ironlog-cli
// ABOUTME: Handles snapshot import and set version history lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;
use std::time::Instant;

use ironlog::{
    errors::{AppError, AppResult},
    ingest::ingest_snapshot,
    logging::AppLogger,
    store::RecordStore,
};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{
    display_import_failure, display_import_report, display_import_totals, display_set_history,
};
use crate::helpers::output::read_document;

/// Import snapshot files, continuing past rejected ones
pub async fn import<S>(store: &S, files: &[PathBuf]) -> AppResult<()>
where
    S: RecordStore + ?Sized,
{
    let started = Instant::now();
    let mut imported = 0;
    let mut failed = 0;
    let mut appended = 0;

    for path in files {
        let outcome = match read_document(path).await {
            Ok(json) => ingest_snapshot(store, &json).await,
            Err(error) => Err(error),
        };
        match outcome {
            Ok(report) => {
                appended += report.records_appended;
                imported += 1;
                display_import_report(path, &report);
            }
            Err(error) => {
                failed += 1;
                AppLogger::log_rejected_document(
                    &path.display().to_string(),
                    &format!("{:?}", error.code),
                    &error.message,
                );
                display_import_failure(path, &error.to_string());
            }
        }
    }

    let records = store.record_count().await?;
    display_import_totals(imported, failed, records);
    AppLogger::log_store_operation("import", appended, failed == 0, started.elapsed());

    if failed > 0 {
        return Err(AppError::invalid_input(format!(
            "{failed} of {} snapshot files were rejected",
            files.len()
        )));
    }
    info!(files = imported, records = appended, "Import complete");
    Ok(())
}

/// Show every version of the logical set containing `set_id`
pub async fn history<S>(store: &S, set_id: Uuid) -> AppResult<()>
where
    S: RecordStore + ?Sized,
{
    let versions = store.set_history(set_id).await?;
    display_set_history(&versions);
    Ok(())
}
