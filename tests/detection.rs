// tests/detection.rs - End-to-end detection scenarios crossing the
// ingestion, scoring, engine and classification seams.

use serde_json::json;

use screening_lib::{
    classify, detect, detect_with_report, detect_with_strategy, records_from_json, similarity,
    DetectionStrategy, FieldMapping, MatchType, NameRecord,
};

fn person(first: &str, last: &str) -> NameRecord {
    NameRecord {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        ..Default::default()
    }
}

fn full(name: &str) -> NameRecord {
    NameRecord {
        full_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Distinct letter-only names; digits would be stripped by normalization.
fn synthetic_name(i: usize) -> NameRecord {
    let letters: Vec<char> = ('A'..='Z').collect();
    full(&format!(
        "ROW {}{} {}",
        letters[i % 26],
        letters[(i / 26) % 26],
        letters[(i / 676) % 26],
    ))
}

#[test]
fn exact_match_scenario() {
    let matches = detect(&[person("JUAN", "SANTOS")], &[person("JUAN", "SANTOS")], 60);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].similarity_score, 100);
    assert_eq!(matches[0].match_type, MatchType::Duplicate);
    assert_eq!(matches[0].component_scores.first_name, Some(100));
    assert_eq!(matches[0].component_scores.last_name, Some(100));
    assert_eq!(matches[0].component_scores.middle_name, None);
}

#[test]
fn no_match_scenario() {
    let matches = detect(&[person("JUAN", "SANTOS")], &[person("PEDRO", "CRUZ")], 60);
    assert!(matches.is_empty());
}

#[test]
fn empty_list_inputs() {
    let records = vec![person("JUAN", "SANTOS")];
    assert!(detect(&[], &records, 60).is_empty());
    assert!(detect(&records, &[], 60).is_empty());
}

#[test]
fn known_misspelling_classifies_as_duplicate() {
    let score = similarity("FLORIAD", "FLORIDA");
    assert!(score >= 80, "expected at least 80, got {}", score);
    assert_eq!(classify(score), MatchType::Duplicate);
}

#[test]
fn classification_boundaries() {
    assert_eq!(classify(79), MatchType::PossibleMismatch);
    assert_eq!(classify(80), MatchType::Duplicate);
    assert_eq!(classify(59), MatchType::NoMatch);
    assert_eq!(classify(60), MatchType::PossibleMismatch);
}

#[test]
fn raising_threshold_never_adds_matches() {
    let incoming = vec![
        person("JUAN", "SANTOS"),
        person("JAUN", "SANTOS"),
        full("MARIA LUISA CRUZ"),
        full("PEDRO REYES"),
    ];
    let candidates = vec![
        person("JUAN", "SANTOS"),
        full("MARIA LUISA CRUZ"),
        full("ROBERTO DELA CRUZ"),
    ];
    let mut previous = usize::MAX;
    for threshold in [-10, 0, 25, 50, 60, 70, 83, 90, 100, 101, 150] {
        let count = detect(&incoming, &candidates, threshold).len();
        assert!(
            count <= previous,
            "threshold {} produced {} matches after {}",
            threshold,
            count,
            previous
        );
        previous = count;
    }
}

#[test]
fn strategy_boundary_at_100_by_500() {
    let incoming: Vec<NameRecord> = (0..100).map(synthetic_name).collect();
    let candidates: Vec<NameRecord> = (0..500).map(synthetic_name).collect();
    let report = detect_with_report(&incoming, &candidates, 101, None).expect("run completes");
    assert_eq!(report.strategy, DetectionStrategy::Exhaustive);

    let incoming_over: Vec<NameRecord> = (0..101).map(synthetic_name).collect();
    let report = detect_with_report(&incoming_over, &candidates, 101, None).expect("run completes");
    assert_eq!(report.strategy, DetectionStrategy::BestMatch);

    let candidates_over: Vec<NameRecord> = (0..501).map(synthetic_name).collect();
    let report = detect_with_report(&incoming, &candidates_over, 101, None).expect("run completes");
    assert_eq!(report.strategy, DetectionStrategy::BestMatch);
}

#[test]
fn strategies_agree_when_each_row_has_one_counterpart() {
    // A cross-section where at most one candidate clears the threshold per
    // incoming row: the two strategies must find the same pairs, even
    // though their cardinality contract differs in general.
    let incoming = vec![
        person("JUAN", "SANTOS"),
        person("MARIA", "CRUZ"),
        person("ANA", "REYES"),
    ];
    let candidates = vec![
        person("MARIA", "CRUZ"),
        person("PEDRO", "LOPEZ"),
        person("JUAN", "SANTOS"),
        person("ANA", "REYES"),
    ];
    let exhaustive =
        detect_with_strategy(&incoming, &candidates, 80, DetectionStrategy::Exhaustive, None)
            .expect("run completes");
    let best = detect_with_strategy(&incoming, &candidates, 80, DetectionStrategy::BestMatch, None)
        .expect("run completes");

    let mut exhaustive_pairs: Vec<(usize, usize)> = exhaustive
        .matches
        .iter()
        .map(|m| (m.incoming_row_index, m.candidate_index))
        .collect();
    let mut best_pairs: Vec<(usize, usize)> = best
        .matches
        .iter()
        .map(|m| (m.incoming_row_index, m.candidate_index))
        .collect();
    exhaustive_pairs.sort_unstable();
    best_pairs.sort_unstable();
    assert_eq!(exhaustive_pairs, vec![(0, 2), (1, 0), (2, 3)]);
    assert_eq!(exhaustive_pairs, best_pairs);
}

#[test]
fn ingested_rows_flow_through_detection() {
    let incoming = json!([
        {"First Name": "Juan", "Last Name": "Santos"},
        {"Name": "   "},
        {"First Name": "Maria", "Last Name": "Cruz"}
    ]);
    let candidates = json!([
        {"first_name": "Juan", "last_name": "Santos"},
        {"first_name": "Roberto", "last_name": "Lim"}
    ]);
    let (incoming, ingest_errors) =
        records_from_json(&incoming, &FieldMapping::excel()).expect("incoming parses");
    let (candidates, _) =
        records_from_json(&candidates, &FieldMapping::db()).expect("candidates parse");
    assert_eq!(ingest_errors.len(), 1);

    let matches = detect(&incoming, &candidates, 60);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, MatchType::Duplicate);
    assert_eq!(
        matches[0].candidate_record.first_name.as_deref(),
        Some("Juan")
    );
}

#[test]
fn match_records_serialize_for_the_api_layer() {
    let matches = detect(&[person("JUAN", "SANTOS")], &[person("JUAN", "SANTOS")], 60);
    let value = serde_json::to_value(&matches).expect("serializes");
    let first = &value[0];
    assert_eq!(first["similarity_score"], 100);
    assert_eq!(first["match_type"], "DUPLICATE");
    assert_eq!(first["component_scores"]["first_name"], 100);
    // Absent components are omitted rather than serialized as null.
    assert!(first["component_scores"].get("middle_name").is_none());
}
