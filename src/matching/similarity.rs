// src/matching/similarity.rs - Composite name similarity: bigram overlap, edit
// distance and tolerant partial matching blended into one 0-100 score.

use super::normalize::normalize;
use std::collections::HashMap;

// Signal weights. These reproduce the scoring contract the surrounding
// system depends on; changing them changes which rows get flagged.
const BIGRAM_WEIGHT: f64 = 0.45;
const EDIT_WEIGHT: f64 = 0.35;
const PARTIAL_WEIGHT: f64 = 0.10;

// Heuristic bonuses, cumulative.
const SAME_FIRST_CHAR_BONUS: f64 = 5.0;
const CLOSE_LENGTH_BONUS: f64 = 5.0;
const SHORT_NAME_BONUS: f64 = 15.0;
const HIGH_SIGNAL_BONUS: f64 = 5.0;

/// Longest name still eligible for the short-name bonus. Seven covers the
/// one-substitution-in-a-seven-letter-name misspelling case.
const SHORT_NAME_MAX_LEN: usize = 7;
const SHORT_NAME_SIGNAL_FLOOR: f64 = 50.0;
const HIGH_SIGNAL_FLOOR: f64 = 80.0;

/// A windowed partial match below this ratio counts as "no match" and
/// contributes zero.
const PARTIAL_ACCEPT_RATIO: f64 = 0.4;

/// Composite similarity between two raw name strings, 0-100.
///
/// Both inputs are normalized first. Empty normalized input scores 0,
/// identical normalized input scores 100. Otherwise three signals are
/// blended (bigram/Dice 0.45, edit-distance 0.35, partial match 0.10) and
/// the heuristic bonuses are added, with the result rounded and capped
/// at 100. Symmetric in its arguments.
pub fn similarity(name_a: &str, name_b: &str) -> u32 {
    let a = normalize(name_a);
    let b = normalize(name_b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let bigram = bigram_dice(&a, &b) * 100.0;
    let edit = edit_similarity(&a, &b);
    let partial = partial_match_score(&a, &b);

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let strongest = bigram.max(edit);

    let mut bonus = 0.0;
    if a.chars().next() == b.chars().next() {
        bonus += SAME_FIRST_CHAR_BONUS;
    }
    if len_a.abs_diff(len_b) <= 1 {
        bonus += CLOSE_LENGTH_BONUS;
    }
    if strongest >= SHORT_NAME_SIGNAL_FLOOR && len_a.max(len_b) <= SHORT_NAME_MAX_LEN {
        bonus += SHORT_NAME_BONUS;
    }
    if strongest >= HIGH_SIGNAL_FLOOR {
        bonus += HIGH_SIGNAL_BONUS;
    }

    let total = BIGRAM_WEIGHT * bigram + EDIT_WEIGHT * edit + PARTIAL_WEIGHT * partial + bonus;
    (total.round() as u32).min(100)
}

/// Sorensen-Dice coefficient over character bigrams, 0.0-1.0.
///
/// Bigrams are counted as a multiset, so repeated bigrams in one string
/// only pair up with repeats in the other.
pub fn bigram_dice(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.len() < 2 || b_chars.len() < 2 {
        return 0.0;
    }

    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for w in a_chars.windows(2) {
        *counts.entry((w[0], w[1])).or_insert(0) += 1;
    }
    let mut shared = 0usize;
    for w in b_chars.windows(2) {
        if let Some(n) = counts.get_mut(&(w[0], w[1])) {
            if *n > 0 {
                *n -= 1;
                shared += 1;
            }
        }
    }

    let total = (a_chars.len() - 1) + (b_chars.len() - 1);
    (2 * shared) as f64 / total as f64
}

/// Edit-distance similarity, 0-100: `(max_len - distance) / max_len * 100`.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 {
        return 100.0;
    }
    let dist = levenshtein_chars(&a_chars, &b_chars);
    (max_len - dist) as f64 / max_len as f64 * 100.0
}

/// Character-level Levenshtein distance (insert/delete/substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    levenshtein_chars(&a_chars, &b_chars)
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    let (len_a, len_b) = (a.len(), b.len());
    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }
    let mut matrix = vec![vec![0usize; len_b + 1]; len_a + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len_b {
        matrix[0][j] = j;
    }
    for i in 1..=len_a {
        for j in 1..=len_b {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }
    matrix[len_a][len_b]
}

/// Tolerant partial match, 0-100: the shorter string slides across the
/// longer one and the best windowed edit similarity wins. Position in the
/// longer string does not matter. Windows below the acceptance ratio count
/// as no match at all.
pub fn partial_match_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let window = needle.len();
    let mut best = 0.0f64;
    for start in 0..=(haystack.len() - window) {
        let dist = levenshtein_chars(needle, &haystack[start..start + window]);
        let ratio = (window - dist) as f64 / window as f64;
        best = best.max(ratio);
        if best == 1.0 {
            break;
        }
    }

    if best < PARTIAL_ACCEPT_RATIO {
        0.0
    } else {
        best * 100.0
    }
}
