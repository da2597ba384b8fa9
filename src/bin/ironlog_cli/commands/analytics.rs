// ABOUTME: Analytics commands for ironlog-cli
// ABOUTME: Builds the analytics export document and the weekly streak report from the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::time::Instant;

use chrono::{FixedOffset, Utc};
use ironlog::{
    config::AppConfig,
    errors::AppResult,
    export::AnalyticsExporter,
    intelligence::StreakCalculator,
    logging::AppLogger,
    store::RecordStore,
};

use crate::helpers::display::display_streak;
use crate::helpers::output::write_json;

/// Write the analytics export for every stored workout
pub async fn export<S>(
    store: &S,
    config: &AppConfig,
    offset: FixedOffset,
    output: Option<&Path>,
) -> AppResult<()>
where
    S: RecordStore + ?Sized,
{
    let started = Instant::now();
    let workouts = store.workouts(false).await?;
    let exporter = AnalyticsExporter::new(config.intelligence.clone(), offset);
    let document = exporter.export(&workouts, Utc::now())?;

    write_json(&document, output).await?;
    AppLogger::log_store_operation("export", workouts.len(), true, started.elapsed());
    Ok(())
}

/// Show the weekly streak, optionally against a custom target
pub async fn streak<S>(
    store: &S,
    config: &AppConfig,
    offset: FixedOffset,
    target: Option<u32>,
) -> AppResult<()>
where
    S: RecordStore + ?Sized,
{
    let workouts = store.workouts(false).await?;
    let mut calculator = StreakCalculator::from_config(&config.intelligence.streak);
    if let Some(target) = target {
        calculator = calculator.with_target(target);
    }
    let report = calculator.calculate_for_workouts(&workouts, Utc::now(), offset);
    display_streak(&report);
    Ok(())
}
