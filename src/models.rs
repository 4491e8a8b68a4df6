// src/models.rs - Record, mapping and match types shared across the engine.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::matching::normalize::normalize;

/// A person row as read from an upload or from the existing database.
/// All fields are optional; at least one of them must yield a non-empty
/// normalized name for the record to take part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub extension_name: Option<String>,
}

impl NameRecord {
    /// The string used for full-name comparisons: the full name when
    /// present, otherwise the components joined in display order.
    pub fn display_name(&self) -> String {
        if let Some(full) = &self.full_name {
            let trimmed = full.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
        let mut parts = Vec::new();
        for field in [
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.extension_name,
        ] {
            if let Some(value) = field {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
        }
        parts.join(" ")
    }

    /// Whether the record carries any comparable name at all.
    pub fn has_comparable_name(&self) -> bool {
        !normalize(&self.display_name()).is_empty()
    }

    fn trimmed(field: &Option<String>) -> Option<&str> {
        field.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn first_name_trimmed(&self) -> Option<&str> {
        Self::trimmed(&self.first_name)
    }

    pub fn middle_name_trimmed(&self) -> Option<&str> {
        Self::trimmed(&self.middle_name)
    }

    pub fn last_name_trimmed(&self) -> Option<&str> {
        Self::trimmed(&self.last_name)
    }
}

/// Maps a row source's field names onto [`NameRecord`] fields. Sources
/// disagree on header text (Excel uploads vs database columns), so the
/// mapping is supplied by the caller once at the ingestion boundary rather
/// than guessed inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub full_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub extension_name: String,
}

impl FieldMapping {
    /// Header text as produced by roster spreadsheet uploads.
    pub fn excel() -> Self {
        Self {
            full_name: "Name".to_string(),
            first_name: "First Name".to_string(),
            middle_name: "Middle Name".to_string(),
            last_name: "Last Name".to_string(),
            extension_name: "Ext. Name".to_string(),
        }
    }

    /// Column names as stored in the beneficiary database.
    pub fn db() -> Self {
        Self {
            full_name: "name".to_string(),
            first_name: "first_name".to_string(),
            middle_name: "middle_name".to_string(),
            last_name: "last_name".to_string(),
            extension_name: "ext_name".to_string(),
        }
    }
}

/// Per-component similarity breakdown for one compared pair. A component
/// absent on either side stays `None` and contributed nothing to the blend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<u32>,
}

/// Classification tier of a detected match.
///
/// `classify` only ever produces `Duplicate`, `PossibleMismatch` or
/// `NoMatch`; `ReviewZone` exists for the display layer, which relabels
/// the possible-mismatch band when rendering its review filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Duplicate,
    PossibleMismatch,
    ReviewZone,
    NoMatch,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "DUPLICATE",
            Self::PossibleMismatch => "POSSIBLE_MISMATCH",
            Self::ReviewZone => "REVIEW_ZONE",
            Self::NoMatch => "NO_MATCH",
        }
    }

    /// The label the review-queue view shows for this tier. Possible
    /// mismatches are relabeled; every other tier keeps its own name.
    pub fn review_zone_label(self) -> Self {
        match self {
            Self::PossibleMismatch => Self::ReviewZone,
            other => other,
        }
    }
}

/// How the engine compared the two rosters.
///
/// Exhaustive mode may surface several candidates per incoming row;
/// best-match mode surfaces at most one. The cardinality difference is
/// deliberate and size-driven, not an accident of implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    Exhaustive,
    BestMatch,
}

impl DetectionStrategy {
    /// Pick the strategy for the given input sizes.
    pub fn select(incoming: usize, candidates: usize) -> Self {
        if incoming <= config::MAX_EXHAUSTIVE_INCOMING
            && candidates <= config::MAX_EXHAUSTIVE_CANDIDATES
        {
            Self::Exhaustive
        } else {
            Self::BestMatch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::BestMatch => "best_match",
        }
    }
}

/// One detected correspondence between an incoming row and a stored
/// candidate. Never mutated after creation; lives only for the duration of
/// the detection request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub incoming_row_index: usize,
    pub incoming_record: NameRecord,
    pub candidate_index: usize,
    pub candidate_record: NameRecord,
    pub similarity_score: u32,
    pub component_scores: ComponentScores,
    pub match_type: MatchType,
}
