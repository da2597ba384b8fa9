// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for ironlog-cli
// ABOUTME: Provides consistent display functions for import reports, metrics, and set histories

use std::path::Path;

use ironlog::ingest::IngestReport;
use ironlog::intelligence::{StreakReport, WorkoutSummary};
use ironlog::models::SetRecord;
use ironlog::snapshot::WorkoutSnapshot;

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

/// Display the outcome of importing one file
pub fn display_import_report(path: &Path, report: &IngestReport) {
    println!(
        "Success {} -> workout {} (schema {}): {} appended, {} already stored",
        path.display(),
        report.workout_id,
        report.source_schema_version,
        report.records_appended,
        report.records_skipped
    );
}

/// Display a file that could not be imported
pub fn display_import_failure(path: &Path, error: &str) {
    println!("Error {}: {error}", path.display());
}

/// Display totals after an import run
pub fn display_import_totals(imported: usize, failed: usize, records: usize) {
    println!("{}", "=".repeat(60));
    println!("Imported: {imported}");
    println!("Rejected: {failed}");
    println!("Records in store: {records}");
}

/// Display a verified snapshot with its derived metrics
pub fn display_verification(
    source_version: &str,
    snapshot: &WorkoutSnapshot,
    summary: &WorkoutSummary,
    records: usize,
) {
    let metadata = &snapshot.metadata;
    println!("\nSuccess Snapshot is valid");
    println!("{}", "=".repeat(60));
    println!("   Workout: {} ({})", metadata.name, snapshot.workout_id);
    println!(
        "   Schema: {source_version} -> {}",
        snapshot.schema_version
    );
    println!(
        "   Started: {}",
        metadata.started_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "   Deleted: {}",
        if metadata.is_deleted { "Yes" } else { "No" }
    );
    println!("   Exercises: {}", snapshot.exercises.len());
    println!("   Records: {records}");

    println!("\nMETRICS:");
    println!("   Volume: {:.1} kg", summary.volume_kg);
    println!("   Working sets: {}", summary.working_sets);
    println!("   Hard sets: {}", summary.hard_sets);
    println!(
        "   Average RPE: {}",
        optional(summary.average_rpe.map(|rpe| format!("{rpe:.1}")))
    );
    println!("   RPE coverage: {:.0}%", summary.rpe_coverage * 100.0);
    println!("   Duration: {} s", optional(summary.duration_seconds));
    println!("   Effort density: {:.2} kg/min", summary.effort_density);
    println!("   Fatigue index: {:.1}", summary.fatigue_index);
}

/// Display a weekly streak
pub fn display_streak(report: &StreakReport) {
    println!("Streak: {} week(s)", report.weeks);
    println!("   Target per week: {}", report.target_per_week);
    println!(
        "   This week: {} of {} expected so far",
        report.current_week_count, report.current_week_expected
    );
}

/// Display every version of one set, oldest first
pub fn display_set_history(versions: &[SetRecord]) {
    println!(
        "{:<38} {:>9} {:>5} {:>5} {:<8}",
        "Version", "Weight", "Reps", "RPE", "Status"
    );
    println!("{}", "-".repeat(70));
    for (index, set) in versions.iter().enumerate() {
        let status = match (index + 1 == versions.len(), set.is_deleted) {
            (false, _) => "replaced",
            (true, true) => "deleted",
            (true, false) => "current",
        };
        println!(
            "{:<38} {:>9} {:>5} {:>5} {:<8}",
            set.id,
            optional(set.weight_kg),
            optional(set.reps),
            optional(set.rpe),
            status
        );
    }
}
