// src/matching/normalize.rs - Canonical name form used by every comparison in the engine.

/// Normalize a raw name for comparison: upper-case, keep only Latin letters
/// and spaces, collapse whitespace runs, trim.
///
/// Total over all inputs and idempotent. An empty result means "no name
/// available" and callers must exclude the record from comparison rather
/// than treat it as a wildcard.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        for up in ch.to_uppercase() {
            if up.is_ascii_uppercase() {
                out.push(up);
            } else if up.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            // digits, punctuation and non-Latin letters are dropped
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

/// Normalize an optional field, mapping a missing value to the empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}
