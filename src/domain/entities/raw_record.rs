//! Untyped QR code record as returned by the listing endpoint.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One QR code object from the upstream API.
///
/// Nothing is guaranteed beyond "is a JSON object": any field may be absent,
/// null, or of an unexpected type. Typed access happens in
/// [`crate::utils::record_normalizer`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps an already decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Converts a JSON value into a record, returning `None` for non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Returns the field value, treating explicit `null` as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|value| !value.is_null())
    }

    /// Returns the field as a string slice if it holds a JSON string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_objects_only() {
        assert!(RawRecord::from_value(json!({ "id": 1 })).is_some());
        assert!(RawRecord::from_value(json!([1, 2])).is_none());
        assert!(RawRecord::from_value(json!("qr")).is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let record = RawRecord::from_value(json!({ "title": null, "short_url": "abc" })).unwrap();

        assert!(record.get("title").is_none());
        assert!(record.get("missing").is_none());
        assert_eq!(record.get_str("short_url"), Some("abc"));
    }

    #[test]
    fn test_deserialize_transparent() {
        let record: RawRecord = serde_json::from_str(r#"{"id": 42, "type_name": "URL"}"#).unwrap();
        assert_eq!(record.get("id"), Some(&json!(42)));
        assert_eq!(record.get_str("type_name"), Some("URL"));
    }
}
