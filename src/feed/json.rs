//! JSON feed parsing.
//!
//! Accepts the two functionally equivalent shapes: a top-level object with
//! a `disclaimers` key holding either an id-keyed map of records or an
//! array of records. Shape problems inside individual records are not
//! handled here — the validator partitions those out record by record.

use crate::error::WidgetError;
use serde_json::Value;

/// Parse a JSON feed body into canonical records.
pub fn parse_json_feed(body: &str) -> Result<Vec<Value>, WidgetError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| WidgetError::MalformedFeed(format!("invalid JSON: {e}")))?;

    let disclaimers = root
        .get("disclaimers")
        .ok_or_else(|| WidgetError::MalformedFeed("missing disclaimers".to_string()))?;

    match disclaimers {
        Value::Object(map) => Ok(map.values().cloned().collect()),
        Value::Array(records) => Ok(records.clone()),
        _ => Err(WidgetError::MalformedFeed(
            "disclaimers is neither a map nor an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_shape() {
        let records = parse_json_feed(
            r#"{"disclaimers": {
                "1": {"id": "1", "title": "A"},
                "2": {"id": "2", "title": "B"}
            }}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_array_shape() {
        let records =
            parse_json_feed(r#"{"disclaimers": [{"id": 1}, {"id": 2}, {"id": 3}]}"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["id"], 1);
    }

    #[test]
    fn test_missing_disclaimers_key() {
        let err = parse_json_feed(r#"{"notices": []}"#).unwrap_err();
        assert!(err.to_string().contains("missing disclaimers"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_json_feed("{nope").is_err());
        assert!(parse_json_feed("").is_err());
    }

    #[test]
    fn test_scalar_disclaimers_rejected() {
        assert!(parse_json_feed(r#"{"disclaimers": 42}"#).is_err());
    }
}
