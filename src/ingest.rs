// src/ingest.rs - Turning caller-supplied JSON rows into NameRecords via a
// field mapping resolved once at the boundary.

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::models::{FieldMapping, NameRecord};
use crate::results::RowError;

fn string_field(row: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    row.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Build a [`NameRecord`] from one row object. Returns `None` when the row
/// carries none of the mapped name fields.
pub fn record_from_row(row: &serde_json::Map<String, Value>, mapping: &FieldMapping) -> Option<NameRecord> {
    let record = NameRecord {
        full_name: string_field(row, &mapping.full_name),
        first_name: string_field(row, &mapping.first_name),
        middle_name: string_field(row, &mapping.middle_name),
        last_name: string_field(row, &mapping.last_name),
        extension_name: string_field(row, &mapping.extension_name),
    };
    if record == NameRecord::default() {
        None
    } else {
        Some(record)
    }
}

/// Parse a JSON array of row objects into records.
///
/// Anything other than an array is a caller programming error and fails
/// fast. Individual bad elements (non-objects, rows with none of the
/// mapped fields) are skipped and reported, never fatal. Rows whose fields
/// are present but normalize to empty are kept here; the engine skips them
/// with its own diagnostics.
pub fn records_from_json(rows: &Value, mapping: &FieldMapping) -> Result<(Vec<NameRecord>, Vec<RowError>)> {
    let rows = rows
        .as_array()
        .context("expected a JSON array of row objects")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        let Some(object) = row.as_object() else {
            errors.push(RowError {
                row_index,
                reason: "row is not an object".to_string(),
            });
            continue;
        };
        match record_from_row(object, mapping) {
            Some(record) => records.push(record),
            None => errors.push(RowError {
                row_index,
                reason: "row has neither a full name nor any name component".to_string(),
            }),
        }
    }
    debug!(
        "Parsed {} records from {} rows ({} skipped)",
        records.len(),
        rows.len(),
        errors.len()
    );
    Ok((records, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_excel_headers() {
        let rows = json!([
            {"First Name": "Juan", "Last Name": "Santos", "Ext. Name": "Jr."},
            {"Name": "Maria Cruz"}
        ]);
        let (records, errors) = records_from_json(&rows, &FieldMapping::excel()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name.as_deref(), Some("Juan"));
        assert_eq!(records[0].extension_name.as_deref(), Some("Jr."));
        assert_eq!(records[1].full_name.as_deref(), Some("Maria Cruz"));
    }

    #[test]
    fn parses_db_columns() {
        let rows = json!([{"first_name": "Juan", "last_name": "Santos"}]);
        let (records, errors) = records_from_json(&rows, &FieldMapping::db()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records[0].last_name.as_deref(), Some("Santos"));
    }

    #[test]
    fn custom_mapping_is_respected() {
        let mapping = FieldMapping {
            full_name: "fullName".to_string(),
            first_name: "fn".to_string(),
            middle_name: "mn".to_string(),
            last_name: "ln".to_string(),
            extension_name: "suffix".to_string(),
        };
        let rows = json!([{"fn": "Juan", "ln": "Santos"}]);
        let (records, _) = records_from_json(&rows, &mapping).unwrap();
        assert_eq!(records[0].first_name.as_deref(), Some("Juan"));
    }

    #[test]
    fn bad_elements_are_skipped_not_fatal() {
        let rows = json!([
            {"first_name": "Juan", "last_name": "Santos"},
            42,
            {"unrelated": "field"},
            {"first_name": "   "}
        ]);
        let (records, errors) = records_from_json(&rows, &FieldMapping::db()).unwrap();
        assert_eq!(records.len(), 1);
        let skipped: Vec<usize> = errors.iter().map(|e| e.row_index).collect();
        assert_eq!(skipped, vec![1, 2, 3]);
    }

    #[test]
    fn non_array_input_fails_fast() {
        assert!(records_from_json(&json!({"rows": []}), &FieldMapping::db()).is_err());
        assert!(records_from_json(&json!("not rows"), &FieldMapping::db()).is_err());
    }

    #[test]
    fn non_string_values_are_ignored() {
        let rows = json!([{"first_name": 7, "last_name": "Santos"}]);
        let (records, _) = records_from_json(&rows, &FieldMapping::db()).unwrap();
        assert_eq!(records[0].first_name, None);
        assert_eq!(records[0].last_name.as_deref(), Some("Santos"));
    }
}
