// src/matching/components.rs - Component-wise name matching: first/middle/last
// scored independently, then blended with agreement bonuses.

use super::similarity::similarity;
use crate::models::{ComponentScores, NameRecord};

const FIRST_NAME_WEIGHT: f64 = 0.4;
const MIDDLE_NAME_WEIGHT: f64 = 0.2;
const LAST_NAME_WEIGHT: f64 = 0.4;

/// A component scoring at or above this counts toward the agreement bonus.
const STRONG_COMPONENT_FLOOR: u32 = 70;
const MULTI_AGREEMENT_BONUS: f64 = 15.0;
const SINGLE_AGREEMENT_BONUS: f64 = 5.0;

/// Scores one component pair when both sides have a value.
fn score_pair(left: Option<&str>, right: Option<&str>) -> Option<u32> {
    match (left, right) {
        (Some(a), Some(b)) => Some(similarity(a, b)),
        _ => None,
    }
}

/// Blend per-component similarities into one 0-100 score.
///
/// Only components present (non-empty after trimming) on both sides are
/// scored; an absent component contributes neither score nor weight, so a
/// missing middle name neither penalizes nor inflates the result. When no
/// component is shared at all the score is 0.
pub fn component_similarity(incoming: &NameRecord, candidate: &NameRecord) -> (u32, ComponentScores) {
    let breakdown = ComponentScores {
        first_name: score_pair(incoming.first_name_trimmed(), candidate.first_name_trimmed()),
        middle_name: score_pair(incoming.middle_name_trimmed(), candidate.middle_name_trimmed()),
        last_name: score_pair(incoming.last_name_trimmed(), candidate.last_name_trimmed()),
    };

    let mut total = 0.0f64;
    let mut denominator = 0.0f64;
    let mut strong_components = 0u32;
    for (score, weight) in [
        (breakdown.first_name, FIRST_NAME_WEIGHT),
        (breakdown.middle_name, MIDDLE_NAME_WEIGHT),
        (breakdown.last_name, LAST_NAME_WEIGHT),
    ] {
        if let Some(score) = score {
            total += score as f64 * weight;
            denominator += weight;
            if score >= STRONG_COMPONENT_FLOOR {
                strong_components += 1;
            }
        }
    }

    let base = if denominator > 0.0 { total / denominator } else { 0.0 };
    let bonus = if strong_components >= 2 {
        MULTI_AGREEMENT_BONUS
    } else if strong_components == 1 {
        SINGLE_AGREEMENT_BONUS
    } else {
        0.0
    };

    let score = ((base + bonus).round() as u32).min(100);
    (score, breakdown)
}
