// src/config.rs - Shared numeric boundaries for classification and strategy selection.

/// Scores at or above this are classified as DUPLICATE.
pub const DUPLICATE_SCORE_FLOOR: u32 = 80;

/// Scores at or above this (and below the duplicate floor) are classified
/// as POSSIBLE_MISMATCH. The review-zone UI filter relabels the same band.
pub const POSSIBLE_MISMATCH_SCORE_FLOOR: u32 = 60;

/// Largest incoming roster for which every pair is compared exhaustively.
pub const MAX_EXHAUSTIVE_INCOMING: usize = 100;

/// Largest candidate set for which every pair is compared exhaustively.
pub const MAX_EXHAUSTIVE_CANDIDATES: usize = 500;

/// Incoming records are processed in batches of this size. The cancellation
/// flag is checked between batches; batch boundaries never change which
/// matches are found.
pub const DETECTION_BATCH_SIZE: usize = 200;
