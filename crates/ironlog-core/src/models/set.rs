// ABOUTME: Set record model for a single resistance-training effort
// ABOUTME: Immutable record with supersession back-link and a fluent builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One resistance-training effort
///
/// Sets are immutable once appended. An edit produces a new `SetRecord` whose
/// `previous_version_id` points at the version it replaces; following those
/// links yields the audit history of one logical set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Unique identifier of this version
    pub id: Uuid,
    /// Exercise instance this set belongs to
    pub exercise_instance_id: Uuid,
    /// Ordinal position within the exercise (1-based)
    pub set_number: u32,
    /// Load in kilograms, `None` for bodyweight work
    pub weight_kg: Option<f64>,
    /// Completed repetitions
    pub reps: Option<u32>,
    /// Rate of perceived exertion (1-10)
    pub rpe: Option<f64>,
    /// Reps in reserve (0-5)
    pub rir: Option<u8>,
    /// Planned rest after the set
    pub rest_seconds: Option<u32>,
    /// Tempo descriptor such as "3-1-1-0"
    pub tempo: Option<String>,
    /// Warmup sets are excluded from working-set metrics
    pub is_warmup: bool,
    /// Set was taken to technical failure
    pub is_failure: bool,
    /// Set was part of a drop set
    pub is_dropset: bool,
    /// Soft-delete flag
    pub is_deleted: bool,
    /// When the set was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Version this record supersedes
    pub previous_version_id: Option<Uuid>,
}

impl SetRecord {
    /// Whether the set participates in calculations at all
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Non-deleted, non-warmup set
    #[must_use]
    pub const fn is_working(&self) -> bool {
        !self.is_deleted && !self.is_warmup
    }

    /// Whether this record replaced an earlier version
    #[must_use]
    pub const fn is_revision(&self) -> bool {
        self.previous_version_id.is_some()
    }

    /// Build the next version of this set
    ///
    /// The returned builder carries every field of the current version, a fresh
    /// identifier and the back-link to `self`.
    #[must_use]
    pub fn revise(&self) -> SetRecordBuilder {
        let mut next = self.clone();
        next.id = Uuid::new_v4();
        next.is_deleted = false;
        next.previous_version_id = Some(self.id);
        SetRecordBuilder { set: next }
    }
}

/// Builder for [`SetRecord`]
///
/// # Example
///
/// ```rust
/// use ironlog_core::models::SetRecordBuilder;
/// use uuid::Uuid;
///
/// let set = SetRecordBuilder::new(Uuid::new_v4(), 1)
///     .weight_kg(80.0)
///     .reps(8)
///     .rpe(8.5)
///     .build();
/// assert_eq!(set.weight_kg, Some(80.0));
/// ```
#[derive(Debug, Clone)]
pub struct SetRecordBuilder {
    set: SetRecord,
}

impl SetRecordBuilder {
    /// Start a set for the given exercise instance and position
    #[must_use]
    pub fn new(exercise_instance_id: Uuid, set_number: u32) -> Self {
        Self {
            set: SetRecord {
                id: Uuid::new_v4(),
                exercise_instance_id,
                set_number,
                weight_kg: None,
                reps: None,
                rpe: None,
                rir: None,
                rest_seconds: None,
                tempo: None,
                is_warmup: false,
                is_failure: false,
                is_dropset: false,
                is_deleted: false,
                completed_at: None,
                previous_version_id: None,
            },
        }
    }

    /// Use an explicit identifier
    #[must_use]
    pub const fn id(mut self, id: Uuid) -> Self {
        self.set.id = id;
        self
    }

    /// Sets the load in kilograms
    #[must_use]
    pub const fn weight_kg(mut self, value: f64) -> Self {
        self.set.weight_kg = Some(value);
        self
    }

    /// Sets the load in kilograms (optional)
    #[must_use]
    pub const fn weight_kg_opt(mut self, value: Option<f64>) -> Self {
        self.set.weight_kg = value;
        self
    }

    /// Sets the repetitions
    #[must_use]
    pub const fn reps(mut self, value: u32) -> Self {
        self.set.reps = Some(value);
        self
    }

    /// Sets the repetitions (optional)
    #[must_use]
    pub const fn reps_opt(mut self, value: Option<u32>) -> Self {
        self.set.reps = value;
        self
    }

    /// Sets the RPE
    #[must_use]
    pub const fn rpe(mut self, value: f64) -> Self {
        self.set.rpe = Some(value);
        self
    }

    /// Sets the reps in reserve
    #[must_use]
    pub const fn rir(mut self, value: u8) -> Self {
        self.set.rir = Some(value);
        self
    }

    /// Sets the planned rest
    #[must_use]
    pub const fn rest_seconds(mut self, value: u32) -> Self {
        self.set.rest_seconds = Some(value);
        self
    }

    /// Sets the tempo descriptor
    #[must_use]
    pub fn tempo(mut self, value: impl Into<String>) -> Self {
        self.set.tempo = Some(value.into());
        self
    }

    /// Marks the set as a warmup
    #[must_use]
    pub const fn warmup(mut self, value: bool) -> Self {
        self.set.is_warmup = value;
        self
    }

    /// Marks the set as taken to failure
    #[must_use]
    pub const fn failure(mut self, value: bool) -> Self {
        self.set.is_failure = value;
        self
    }

    /// Marks the set as a drop set
    #[must_use]
    pub const fn dropset(mut self, value: bool) -> Self {
        self.set.is_dropset = value;
        self
    }

    /// Sets the soft-delete flag
    #[must_use]
    pub const fn deleted(mut self, value: bool) -> Self {
        self.set.is_deleted = value;
        self
    }

    /// Sets the completion time
    #[must_use]
    pub const fn completed_at(mut self, value: DateTime<Utc>) -> Self {
        self.set.completed_at = Some(value);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> SetRecord {
        self.set
    }
}
