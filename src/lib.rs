// src/lib.rs

//! Fuzzy duplicate screening for beneficiary rosters.
//!
//! Incoming roster rows are compared against an existing candidate set
//! using a composite name-similarity score (bigram overlap, edit distance,
//! tolerant partial matching) plus component-wise first/middle/last
//! scoring. Pairs at or above a caller-chosen threshold come back as
//! classified match records. Detection is stateless: nothing is persisted
//! between calls, and every run is independent.

pub mod config;
pub mod ingest;
pub mod matching;
pub mod models;
pub mod results;

pub use ingest::{record_from_row, records_from_json};
pub use matching::classify::classify;
pub use matching::components::component_similarity;
pub use matching::engine::{detect, detect_with_report, detect_with_strategy};
pub use matching::normalize::{normalize, normalize_opt};
pub use matching::similarity::{bigram_dice, edit_similarity, levenshtein, partial_match_score, similarity};
pub use models::{
    ComponentScores, DetectionStrategy, FieldMapping, MatchRecord, MatchType, NameRecord,
};
pub use results::{DetectionReport, DetectionStats, RowError};
