// ABOUTME: Local-calendar helpers for grouping workouts into Sunday-start weeks
// ABOUTME: All week math runs in a caller-supplied fixed UTC offset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

use crate::constants::time::{DAYS_PER_WEEK, SECONDS_PER_MINUTE_I32};
use crate::errors::{AppError, AppResult};

/// Build a fixed offset from minutes east of UTC
///
/// # Errors
///
/// Returns `InvalidInput` when the offset is outside +/- 24 hours
pub fn offset_from_minutes(minutes: i32) -> AppResult<FixedOffset> {
    minutes
        .checked_mul(SECONDS_PER_MINUTE_I32)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::invalid_input(format!("UTC offset out of range: {minutes} minutes")))
}

/// Calendar date of an instant in the given offset
#[must_use]
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Sunday that starts the local week containing `instant`
#[must_use]
pub fn week_start(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    let date = local_date(instant, offset);
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Days of the local week that have begun, counting today (Sunday = 1, Saturday = 7)
#[must_use]
pub fn days_elapsed_in_week(instant: DateTime<Utc>, offset: FixedOffset) -> u32 {
    local_date(instant, offset).weekday().num_days_from_sunday() + 1
}

/// Instant `days` days before `now`, saturating at the earliest representable instant
#[must_use]
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Start of the week `weeks` weeks before `week`
#[must_use]
pub fn weeks_before(week: NaiveDate, weeks: i64) -> NaiveDate {
    week - Duration::days(weeks * DAYS_PER_WEEK)
}
