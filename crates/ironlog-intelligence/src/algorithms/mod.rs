// ABOUTME: Algorithm selection types for strength estimation
// ABOUTME: Exposes the one-rep-max formula enum used by calculators and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Estimated one-rep-max formulas (Brzycki, Epley)
pub mod one_rep_max;

pub use one_rep_max::OneRepMaxAlgorithm;
