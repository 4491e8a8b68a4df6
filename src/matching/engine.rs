// src/matching/engine.rs - Detection orchestration: strategy selection,
// batched comparison, match assembly and ordering.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{bail, Result};
use log::{debug, info};

use super::classify::classify;
use super::components::component_similarity;
use super::normalize::normalize;
use super::similarity::{bigram_dice, similarity};
use crate::config;
use crate::models::{ComponentScores, DetectionStrategy, MatchRecord, NameRecord};
use crate::results::{DetectionReport, DetectionStats, RowError};

/// A record with its normalized display name computed once up front.
struct Prepared<'a> {
    index: usize,
    record: &'a NameRecord,
    display: String,
    normalized: String,
}

/// Normalize every record once, splitting off the rows that have no
/// comparable name. Skipped rows never match and never error the run.
fn prepare<'a>(records: &'a [NameRecord], side: &str) -> (Vec<Prepared<'a>>, Vec<RowError>) {
    let mut prepared = Vec::with_capacity(records.len());
    let mut errors = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let display = record.display_name();
        let normalized = normalize(&display);
        if normalized.is_empty() {
            debug!("{} row {} has no comparable name, skipping", side, index);
            errors.push(RowError {
                row_index: index,
                reason: format!("{} name normalizes to empty", side),
            });
            continue;
        }
        prepared.push(Prepared { index, record, display, normalized });
    }
    (prepared, errors)
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> Result<()> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            bail!("detection cancelled by caller");
        }
    }
    Ok(())
}

/// Compare two rosters and return every pair scoring at or above the
/// threshold, best first.
///
/// The strategy is chosen from the input sizes (see
/// [`DetectionStrategy::select`]); callers that need the strategy, skip
/// diagnostics or counters should use [`detect_with_report`]. The
/// threshold is taken as given: values above 100 match nothing, values at
/// or below 0 match every compared pair.
pub fn detect(incoming: &[NameRecord], candidates: &[NameRecord], threshold: i32) -> Vec<MatchRecord> {
    // Without a cancel flag the run always completes.
    match detect_with_report(incoming, candidates, threshold, None) {
        Ok(report) => report.matches,
        Err(_) => Vec::new(),
    }
}

/// Like [`detect`], but returns the tagged report and honors an optional
/// cancellation flag checked between batches.
pub fn detect_with_report(
    incoming: &[NameRecord],
    candidates: &[NameRecord],
    threshold: i32,
    cancel: Option<&AtomicBool>,
) -> Result<DetectionReport> {
    let strategy = DetectionStrategy::select(incoming.len(), candidates.len());
    detect_with_strategy(incoming, candidates, threshold, strategy, cancel)
}

/// Run detection under an explicitly chosen strategy.
///
/// Strategy selection is normally size-driven, but the seam is public
/// because the two strategies deliberately differ in match cardinality:
/// exhaustive mode may report several candidates per incoming row while
/// best-match mode reports at most one. Tests (and callers that need to
/// pin behavior) can force either side of that difference.
pub fn detect_with_strategy(
    incoming: &[NameRecord],
    candidates: &[NameRecord],
    threshold: i32,
    strategy: DetectionStrategy,
    cancel: Option<&AtomicBool>,
) -> Result<DetectionReport> {
    let start_time = Instant::now();
    info!(
        "Starting duplicate detection: {} incoming, {} candidates, threshold {}, {} strategy",
        incoming.len(),
        candidates.len(),
        threshold,
        strategy.as_str()
    );

    let (incoming_prepared, mut row_errors) = prepare(incoming, "incoming");
    let (candidate_prepared, candidate_errors) = prepare(candidates, "candidate");
    row_errors.extend(candidate_errors);

    let mut stats = DetectionStats {
        incoming_total: incoming.len(),
        incoming_skipped: incoming.len() - incoming_prepared.len(),
        candidates_total: candidates.len(),
        candidates_skipped: candidates.len() - candidate_prepared.len(),
        ..Default::default()
    };

    let mut matches = Vec::new();
    if !incoming_prepared.is_empty() && !candidate_prepared.is_empty() {
        match strategy {
            DetectionStrategy::Exhaustive => run_exhaustive(
                &incoming_prepared,
                &candidate_prepared,
                threshold,
                cancel,
                &mut matches,
                &mut stats,
            )?,
            DetectionStrategy::BestMatch => run_best_match(
                &incoming_prepared,
                &candidate_prepared,
                threshold,
                cancel,
                &mut matches,
                &mut stats,
            )?,
        }
    }

    // Best score first; sort_by is stable, so equal scores keep the order
    // in which the pairs were produced.
    matches.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));

    stats.matches_found = matches.len();
    stats.processing_time = start_time.elapsed();
    info!(
        "Detection complete in {:.2?}: {} pairs compared, {} matches, {} rows skipped",
        stats.processing_time,
        stats.pairs_compared,
        stats.matches_found,
        stats.incoming_skipped + stats.candidates_skipped
    );

    Ok(DetectionReport { strategy, matches, row_errors, stats })
}

fn meets_threshold(score: u32, threshold: i32) -> bool {
    score as i64 >= threshold as i64
}

fn build_match(
    incoming: &Prepared,
    candidate: &Prepared,
    score: u32,
    breakdown: ComponentScores,
) -> MatchRecord {
    MatchRecord {
        incoming_row_index: incoming.index,
        incoming_record: incoming.record.clone(),
        candidate_index: candidate.index,
        candidate_record: candidate.record.clone(),
        similarity_score: score,
        component_scores: breakdown,
        match_type: classify(score),
    }
}

/// Exhaustive mode: every incoming row against every candidate. The pair
/// score is the strongest of three signals, so one strong signal is enough
/// to surface a pair.
fn run_exhaustive(
    incoming: &[Prepared],
    candidates: &[Prepared],
    threshold: i32,
    cancel: Option<&AtomicBool>,
    matches: &mut Vec<MatchRecord>,
    stats: &mut DetectionStats,
) -> Result<()> {
    for batch in incoming.chunks(config::DETECTION_BATCH_SIZE) {
        check_cancelled(cancel)?;
        for inc in batch {
            for cand in candidates {
                stats.pairs_compared += 1;
                let full_name = similarity(&inc.display, &cand.display);
                let (component, breakdown) = component_similarity(inc.record, cand.record);
                let dice = (bigram_dice(&inc.normalized, &cand.normalized) * 100.0).round() as u32;
                let score = full_name.max(component).max(dice);
                if meets_threshold(score, threshold) {
                    matches.push(build_match(inc, cand, score, breakdown));
                }
            }
        }
    }
    Ok(())
}

/// Best-match mode: for each incoming row, find the single closest
/// candidate by bigram coefficient alone, then confirm it with component
/// scoring. At most one match per incoming row is reported; ties keep the
/// earliest candidate.
fn run_best_match(
    incoming: &[Prepared],
    candidates: &[Prepared],
    threshold: i32,
    cancel: Option<&AtomicBool>,
    matches: &mut Vec<MatchRecord>,
    stats: &mut DetectionStats,
) -> Result<()> {
    for batch in incoming.chunks(config::DETECTION_BATCH_SIZE) {
        check_cancelled(cancel)?;
        for inc in batch {
            let mut best: Option<(usize, f64)> = None;
            for (pos, cand) in candidates.iter().enumerate() {
                stats.pairs_compared += 1;
                let coefficient = bigram_dice(&inc.normalized, &cand.normalized);
                if best.map_or(true, |(_, best_coeff)| coefficient > best_coeff) {
                    best = Some((pos, coefficient));
                }
            }
            let Some((pos, coefficient)) = best else { continue };
            let dice = (coefficient * 100.0).round() as u32;
            if !meets_threshold(dice, threshold) {
                continue;
            }
            let cand = &candidates[pos];
            let (component, breakdown) = component_similarity(inc.record, cand.record);
            let score = dice.max(component);
            matches.push(build_match(inc, cand, score, breakdown));
        }
    }
    Ok(())
}
