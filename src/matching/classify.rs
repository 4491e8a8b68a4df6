// src/matching/classify.rs - Score-band classification of detected matches.

use crate::config;
use crate::models::MatchType;

/// Bucket a similarity score into its match tier.
///
/// 80 and above is a duplicate, 60-79 a possible mismatch, everything
/// below a non-match. The review-zone view in the UI is a relabeling of
/// the possible-mismatch band (see [`MatchType::review_zone_label`]); it is
/// never a distinct computed tier.
pub fn classify(score: u32) -> MatchType {
    if score >= config::DUPLICATE_SCORE_FLOOR {
        MatchType::Duplicate
    } else if score >= config::POSSIBLE_MISMATCH_SCORE_FLOOR {
        MatchType::PossibleMismatch
    } else {
        MatchType::NoMatch
    }
}
