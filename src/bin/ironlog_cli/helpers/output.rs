// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: File input and JSON output helpers for ironlog-cli
// ABOUTME: Reads snapshot files and writes documents to a file or stdout

use std::path::Path;

use ironlog::errors::{AppError, AppResult};
use serde::Serialize;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::debug;

/// Read a whole file as UTF-8
pub async fn read_document(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("cannot read {}: {e}", path.display()))
            .with_resource_id(path.display().to_string())
            .with_source(e)
    })
}

/// Write `document` as pretty JSON to `output`, or stdout when absent
pub async fn write_json<T>(document: &T, output: Option<&Path>) -> AppResult<()>
where
    T: Serialize + ?Sized,
{
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    match output {
        Some(path) => {
            fs::write(path, json.as_bytes()).await.map_err(|e| {
                AppError::internal(format!("cannot write {}: {e}", path.display())).with_source(e)
            })?;
            debug!(path = %path.display(), bytes = json.len(), "Wrote document");
        }
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(json.as_bytes())
                .await
                .map_err(|e| AppError::internal(format!("cannot write to stdout: {e}")))?;
            stdout
                .flush()
                .await
                .map_err(|e| AppError::internal(format!("cannot flush stdout: {e}")))?;
        }
    }
    Ok(())
}
