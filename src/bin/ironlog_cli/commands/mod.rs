// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for ironlog-cli
// ABOUTME: Provides access to record, snapshot, and analytics commands

pub mod analytics;
pub mod records;
pub mod snapshots;
