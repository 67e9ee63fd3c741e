//! Encoding of the persisted progress ledger.
//!
//! The ledger is one string value holding a JSON array of
//! `{lesson, score, time_spent}` objects. Reads are lenient: an unreadable
//! value decodes as an empty ledger and malformed elements are skipped.

use english_core::model::LessonProgressRecord;
use serde_json::Value;

use crate::repository::StorageError;

/// Key under which the ledger is stored.
pub const LEDGER_KEY: &str = "ee_local_progress";

/// Decode a stored ledger value. Never fails.
#[must_use]
pub fn decode_ledger(raw: Option<&str>) -> Vec<LessonProgressRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "ledger value is not an array, treating as empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "ledger value is not valid JSON, treating as empty");
            return Vec::new();
        }
    };

    let total = items.len();
    let records: Vec<LessonProgressRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() != total {
        tracing::warn!(
            skipped = total - records.len(),
            "dropped malformed ledger entries"
        );
    }
    records
}

/// Encode the ledger for storage.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the records cannot be encoded.
pub fn encode_ledger(records: &[LessonProgressRecord]) -> Result<String, StorageError> {
    serde_json::to_string(records).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use english_core::model::{LessonId, Score};

    #[test]
    fn missing_value_is_empty() {
        assert!(decode_ledger(None).is_empty());
    }

    #[test]
    fn corrupt_value_is_empty() {
        assert!(decode_ledger(Some("not json")).is_empty());
        assert!(decode_ledger(Some(r#"{"lesson": 1}"#)).is_empty());
        assert!(decode_ledger(Some("null")).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let raw = r#"[{"lesson": 1, "score": 50, "time_spent": 10}, {"nope": true}, 7]"#;
        let records = decode_ledger(Some(raw));
        assert_eq!(
            records,
            vec![LessonProgressRecord::new(LessonId::new(1), Score::clamped(50), 10)]
        );
    }

    #[test]
    fn encodes_the_legacy_field_names() {
        let records = vec![LessonProgressRecord::new(LessonId::new(4), Score::clamped(75), 42)];
        let raw = encode_ledger(&records).unwrap();
        assert_eq!(raw, r#"[{"lesson":4,"score":75,"time_spent":42}]"#);
        assert_eq!(decode_ledger(Some(&raw)), records);
    }
}
