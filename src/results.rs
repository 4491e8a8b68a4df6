// src/results.rs - Result and diagnostic types returned by a detection run.

use std::time::Duration;

use serde::Serialize;

use crate::models::{DetectionStrategy, MatchRecord};

/// A row that could not take part in matching, with the reason it was
/// skipped. Skips are diagnostics, never fatal: the run still returns
/// results for every usable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row_index: usize,
    pub reason: String,
}

/// Counters for one detection run.
#[derive(Debug, Clone, Default)]
pub struct DetectionStats {
    pub incoming_total: usize,
    pub incoming_skipped: usize,
    pub candidates_total: usize,
    pub candidates_skipped: usize,
    pub pairs_compared: usize,
    pub matches_found: usize,
    pub processing_time: Duration,
}

/// Full outcome of a detection run: the strategy that was used, the match
/// records, skipped-row diagnostics and run counters.
#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub strategy: DetectionStrategy,
    pub matches: Vec<MatchRecord>,
    pub row_errors: Vec<RowError>,
    pub stats: DetectionStats,
}
