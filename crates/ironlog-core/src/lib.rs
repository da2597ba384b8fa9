// ABOUTME: Core types and constants for the Ironlog workout metrics engine
// ABOUTME: Foundation crate with error handling, domain constants, and workout record models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog Core
//!
//! Foundation crate providing shared types and constants for the Ironlog
//! workout engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Formula coefficients and thresholds organized by domain
//! - **models**: Workout, exercise instance and set records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Workout, `ExerciseInstance`, `SetRecord`)
pub mod models;
