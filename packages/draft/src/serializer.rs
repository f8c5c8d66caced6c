use crate::draft::Draft;
use crate::error::{DraftError, DraftResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Serializer converts a draft back to the JSON shape ingestion accepts
///
/// Output is pretty-printed. Pattern keys come out in ascending numeric order
/// and tieup shafts ascending, so serializing the same draft twice is
/// byte-identical.
pub struct Serializer {
    indent: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(), // 2 spaces
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
        }
    }

    /// Serialize a draft to JSON text
    pub fn serialize(&self, draft: &Draft) -> DraftResult<String> {
        let mut output = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut output, formatter);
        draft
            .serialize(&mut ser)
            .map_err(|e| DraftError::SerializationFailure(e.to_string()))?;
        String::from_utf8(output).map_err(|e| DraftError::SerializationFailure(e.to_string()))
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to serialize a draft with default settings
pub fn serialize(draft: &Draft) -> DraftResult<String> {
    Serializer::new().serialize(draft)
}

/// Serialize a draft into a JSON value
pub fn to_value(draft: &Draft) -> DraftResult<Value> {
    serde_json::to_value(draft).map_err(|e| DraftError::SerializationFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{create_default_on, ingest, parse};
    use serde_json::json;

    fn sample() -> Value {
        json!({ "sections": {
            "wif": { "version": 1.1, "sourceProgram": "Fiberworks" },
            "weaving": { "shafts": 4, "treadles": 4, "risingShed": true },
            "warp": { "threads": 4, "units": "centimeters" },
            "weft": { "threads": 4 },
            "threading": { "1": 1, "2": 2, "3": 3, "4": 4, "10": 1 },
            "tieup": { "1": [2, 1], "2": [3, 2] },
            "treadling": { "1": 1, "2": 2 }
        } })
    }

    #[test]
    fn test_round_trip() {
        let draft = ingest(sample()).unwrap();
        let text = serialize(&draft).unwrap();
        let again = parse(&text).unwrap();
        assert_eq!(draft, again);
    }

    #[test]
    fn test_output_shape() {
        let draft = ingest(sample()).unwrap();
        let value = to_value(&draft).unwrap();

        assert_eq!(value["sections"]["tieup"]["1"], json!([1, 2]));
        assert_eq!(value["sections"]["threading"]["10"], json!(1));
        assert_eq!(value["sections"]["warp"]["units"], json!("centimeters"));
        assert!(value["sections"].get("contents").is_none());
    }

    #[test]
    fn test_pattern_keys_numeric_order() {
        let draft = ingest(sample()).unwrap();
        let text = serialize(&draft).unwrap();
        let two = text.find("\"2\": 2").unwrap();
        let ten = text.find("\"10\": 1").unwrap();
        assert!(two < ten);
    }

    #[test]
    fn test_custom_indent() {
        let draft = create_default_on(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let text = Serializer::with_indent("    ").serialize(&draft).unwrap();
        assert!(text.starts_with("{\n    \"sections\""));
    }

    #[test]
    fn test_default_draft_round_trips() {
        let draft = create_default_on(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let again = parse(&serialize(&draft).unwrap()).unwrap();
        assert_eq!(draft, again);
    }
}
