// ABOUTME: Ordered, version-gated migration chain for snapshot documents
// ABOUTME: Brings older snapshot layouts forward step by step and fails closed on unknown versions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Snapshot migration
//!
//! Each [`SnapshotMigration`] transforms a raw JSON document from exactly one
//! schema version to the next. The chain applies steps until the document
//! reaches the current version. A version with no registered step, a version
//! newer than the current one, or a malformed version string is rejected with
//! `ErrorCode::UnsupportedSchemaVersion`; documents are never guessed at.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::constants::schema::{
    CURRENT_SCHEMA_VERSION, MAX_MIGRATION_STEPS, OLDEST_SUPPORTED_SCHEMA_VERSION,
};
use crate::errors::{AppError, AppResult};

const SCHEMA_VERSION: &str = "schema_version";

/// One step of the chain
#[derive(Clone, Copy)]
pub struct SnapshotMigration {
    /// Version the step accepts
    pub from: &'static str,
    /// Version the step produces
    pub to: &'static str,
    /// Document transform; `schema_version` is updated by the chain
    pub transform: fn(Value) -> AppResult<Value>,
}

impl fmt::Debug for SnapshotMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotMigration")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Ordered list of migrations ending at a target version
#[derive(Debug, Clone)]
pub struct MigrationChain {
    steps: Vec<SnapshotMigration>,
    target: &'static str,
}

/// Parse a `major.minor.patch` version string
fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.').map(str::parse::<u32>);
    let parsed = (parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    parts.next().is_none().then_some(parsed)
}

fn schema_version_of(document: &Value) -> AppResult<String> {
    let version = document
        .get(SCHEMA_VERSION)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::unsupported_schema("<missing>"))?;
    if parse_version(version).is_none() {
        return Err(AppError::unsupported_schema(version));
    }
    Ok(version.to_owned())
}

impl MigrationChain {
    /// Chain with the given steps ending at `target`
    #[must_use]
    pub const fn new(steps: Vec<SnapshotMigration>, target: &'static str) -> Self {
        Self { steps, target }
    }

    /// Every known migration, ending at the current schema version
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec![
                SnapshotMigration {
                    from: OLDEST_SUPPORTED_SCHEMA_VERSION,
                    to: "1.1.0",
                    transform: fold_exercise_definitions,
                },
                SnapshotMigration {
                    from: "1.1.0",
                    to: "1.2.0",
                    transform: explicit_set_units,
                },
            ],
            CURRENT_SCHEMA_VERSION,
        )
    }

    /// Version documents are migrated to
    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// Whether a document at `version` can be brought to the target
    #[must_use]
    pub fn supports(&self, version: &str) -> bool {
        self.path(version).is_ok()
    }

    /// Steps needed to bring `version` to the target
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedSchemaVersion` when no path exists.
    pub fn path(&self, version: &str) -> AppResult<Vec<SnapshotMigration>> {
        if parse_version(version).is_none() {
            return Err(AppError::unsupported_schema(version));
        }
        let mut path = Vec::new();
        let mut current = version;
        while current != self.target {
            if path.len() >= MAX_MIGRATION_STEPS {
                return Err(AppError::unsupported_schema(version));
            }
            let step = self
                .steps
                .iter()
                .find(|step| step.from == current)
                .ok_or_else(|| AppError::unsupported_schema(version))?;
            path.push(*step);
            current = step.to;
        }
        Ok(path)
    }

    /// Migrate a raw document to the target version
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedSchemaVersion` for unknown or malformed versions and
    /// `MigrationFailed` when a step cannot transform the document.
    pub fn migrate(&self, mut document: Value) -> AppResult<Value> {
        let from = schema_version_of(&document)?;
        let path = self.path(&from).inspect_err(|_| {
            warn!(version = %from, target = self.target, "Rejected snapshot schema version");
        })?;

        for step in &path {
            document = (step.transform)(document).inspect_err(|error| {
                warn!(from = step.from, to = step.to, "Snapshot migration failed: {}", error.message);
            })?;
            let Some(object) = document.as_object_mut() else {
                return Err(AppError::migration(format!(
                    "migration {} -> {} did not produce an object",
                    step.from, step.to
                )));
            };
            object.insert(SCHEMA_VERSION.to_owned(), Value::String(step.to.to_owned()));
            debug!(from = step.from, to = step.to, "Applied snapshot migration");
        }
        Ok(document)
    }
}

fn exercises_mut(document: &mut Value) -> AppResult<&mut Vec<Value>> {
    document
        .get_mut("exercises")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::migration("snapshot has no exercises array"))
}

fn object_mut<'a>(value: &'a mut Value, what: &str, index: usize) -> AppResult<&'a mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| AppError::migration(format!("{what} at index {index} is not an object")))
}

/// 1.0.0 -> 1.1.0: flat exercise fields move into `exercise_definition`
fn fold_exercise_definitions(mut document: Value) -> AppResult<Value> {
    for (index, exercise) in exercises_mut(&mut document)?.iter_mut().enumerate() {
        let exercise = object_mut(exercise, "exercise", index)?;
        let name = exercise.remove("exercise_name");
        let movement_pattern = exercise.remove("movement_pattern").unwrap_or(Value::Null);
        let muscle_groups = exercise.remove("muscle_groups").unwrap_or_else(|| Value::Array(Vec::new()));
        let equipment = exercise.remove("equipment").unwrap_or(Value::Null);

        if exercise.contains_key("exercise_definition") {
            continue;
        }
        let Some(name) = name.filter(Value::is_string) else {
            return Err(AppError::migration(format!(
                "exercise at index {index} has no exercise_name"
            )));
        };

        let mut definition = Map::new();
        definition.insert("name".to_owned(), name);
        definition.insert("movement_pattern".to_owned(), movement_pattern);
        definition.insert("primary_muscle_groups".to_owned(), muscle_groups);
        definition.insert("secondary_muscle_groups".to_owned(), Value::Array(Vec::new()));
        definition.insert("equipment".to_owned(), equipment);
        exercise.insert("exercise_definition".to_owned(), Value::Object(definition));
    }
    Ok(document)
}

fn rename_key(set: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = set.remove(from) {
        set.entry(to.to_owned()).or_insert(value);
    }
}

/// 1.1.0 -> 1.2.0: unit-explicit set fields, `rir` and `is_dropset` defaulted
fn explicit_set_units(mut document: Value) -> AppResult<Value> {
    for (index, exercise) in exercises_mut(&mut document)?.iter_mut().enumerate() {
        let sets = object_mut(exercise, "exercise", index)?
            .get_mut("sets")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| AppError::migration(format!("exercise at index {index} has no sets array")))?;

        for (set_index, set) in sets.iter_mut().enumerate() {
            let set = object_mut(set, "set", set_index)?;
            rename_key(set, "weight", "weight_kg");
            rename_key(set, "rest", "rest_seconds");
            set.entry("rir").or_insert(Value::Null);
            set.entry("is_dropset").or_insert(Value::Bool(false));
        }
    }
    Ok(document)
}
