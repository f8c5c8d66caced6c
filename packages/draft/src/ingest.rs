//! # Draft Ingestion
//!
//! Builds a [`Draft`] from the JSON produced by an upstream WIF parser.
//!
//! A candidate is accepted only if it is an object with a `sections` object
//! and `sections.wif.version` is a non-zero number. Sections are then typed as
//! they are taken over:
//!
//! - pattern sections need integer keys and values in `1..=MAX_COUNT`
//! - dimension fields (`weaving.shafts`, `warp.threads`, ...) must be integers
//!   in `1..=MAX_COUNT` when present
//! - tieup treadles with no shafts are dropped
//! - every other section must be an object and is kept verbatim

use crate::dimensions::{Dimension, MAX_COUNT};
use crate::draft::{
    Draft, PatternKind, Section, Threading, Tieup, Treadling, CONTENTS_SECTION, WEAVING_SECTION,
    WIF_SECTION,
};
use crate::error::{DraftError, DraftResult};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const DEFAULT_WIF_VERSION: f64 = 1.1;
pub const DEVELOPERS: &str = "warpdrive-weaver";
pub const SOURCE_PROGRAM: &str = "WarpDrive Weaver";

/// Structural check only; never fails loudly
pub fn validate(value: &Value) -> bool {
    match sections_of(value) {
        Ok(sections) => check_version(sections).is_ok(),
        Err(_) => false,
    }
}

/// Parse JSON text and ingest it
pub fn parse(source: &str) -> DraftResult<Draft> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| DraftError::malformed(format!("invalid JSON: {}", e)))?;
    ingest(value)
}

/// Ingest a parsed value the caller no longer needs (no copy is made)
pub fn ingest(value: Value) -> DraftResult<Draft> {
    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(DraftError::malformed(format!(
                "expected a JSON object, found {}",
                type_name(&other)
            )))
        }
    };

    let sections = match root.remove("sections") {
        Some(Value::Object(sections)) => sections,
        Some(other) => {
            return Err(DraftError::malformed(format!(
                "'sections' must be an object, found {}",
                type_name(&other)
            )))
        }
        None => return Err(DraftError::malformed("missing 'sections' object")),
    };

    check_version(&sections)?;
    build(sections)
}

/// Ingest a value that stays shared with the caller
pub fn ingest_ref(value: &Value) -> DraftResult<Draft> {
    ingest(value.clone())
}

/// Minimal valid draft for starting from scratch, stamped with today's date
pub fn create_default() -> Draft {
    create_default_on(chrono::Local::now().date_naive())
}

/// Minimal valid draft stamped with the given date
pub fn create_default_on(date: NaiveDate) -> Draft {
    let wif = json!({
        "version": DEFAULT_WIF_VERSION,
        "date": date.format("%A, %B %-d, %Y").to_string(),
        "developers": DEVELOPERS,
        "sourceProgram": SOURCE_PROGRAM,
    });
    let contents = json!({
        "wif": true,
        "weaving": false,
        "warp": false,
        "weft": false,
        "threading": false,
        "tieup": false,
        "treadling": false,
    });

    let mut sections = BTreeMap::new();
    sections.insert(WIF_SECTION.to_string(), into_section(wif));
    sections.insert(CONTENTS_SECTION.to_string(), into_section(contents));
    Draft::from_parts(sections, None, None, None)
}

fn into_section(value: Value) -> Section {
    match value {
        Value::Object(section) => section,
        _ => Section::new(),
    }
}

fn sections_of(value: &Value) -> DraftResult<&Map<String, Value>> {
    value
        .get("sections")
        .and_then(Value::as_object)
        .ok_or_else(|| DraftError::malformed("missing 'sections' object"))
}

fn check_version(sections: &Map<String, Value>) -> DraftResult<()> {
    let version = sections.get(WIF_SECTION).and_then(|wif| wif.get("version"));
    match version {
        Some(Value::Number(n)) if n.as_f64().map_or(false, |v| v != 0.0) => Ok(()),
        Some(Value::Number(_)) => Err(DraftError::malformed("'wif.version' must be non-zero")),
        Some(other) => Err(DraftError::malformed(format!(
            "'wif.version' must be a number, found {}",
            type_name(other)
        ))),
        None => Err(DraftError::malformed("missing 'wif.version'")),
    }
}

fn build(sections: Map<String, Value>) -> DraftResult<Draft> {
    let mut plain = BTreeMap::new();
    let mut threading = None;
    let mut tieup = None;
    let mut treadling = None;

    for (name, value) in sections {
        match PatternKind::from_section_name(&name) {
            Some(PatternKind::Threading) => threading = Some(pattern::<Threading>(&name, value)?),
            Some(PatternKind::Tieup) => {
                tieup = Some(pattern::<Tieup>(&name, value)?.without_untied())
            }
            Some(PatternKind::Treadling) => treadling = Some(pattern::<Treadling>(&name, value)?),
            None => {
                let section = match value {
                    Value::Object(section) => section,
                    other => {
                        return Err(DraftError::malformed_section(
                            &name,
                            format!("expected an object, found {}", type_name(&other)),
                        ))
                    }
                };
                check_fields(&name, &section)?;
                plain.insert(name, section);
            }
        }
    }

    let draft = Draft::from_parts(plain, threading, tieup, treadling);
    debug!(
        sections = draft.section_names().len(),
        threads = draft.threading().len(),
        tieup = draft.tieup().len(),
        picks = draft.treadling().len(),
        "Ingested draft"
    );
    Ok(draft)
}

/// A pattern section deserialized from its JSON object
trait PatternSection: DeserializeOwned {
    /// First entry holding a number outside `1..=MAX_COUNT`
    fn first_out_of_range(&self) -> Option<String>;
}

fn in_range(number: u32) -> bool {
    (1..=MAX_COUNT).contains(&number)
}

impl PatternSection for Threading {
    fn first_out_of_range(&self) -> Option<String> {
        self.iter()
            .find(|(thread, shaft)| !in_range(*thread) || !in_range(*shaft))
            .map(|(thread, shaft)| format!("thread {} -> shaft {}", thread, shaft))
    }
}

impl PatternSection for Tieup {
    fn first_out_of_range(&self) -> Option<String> {
        self.iter()
            .find(|(treadle, shafts)| {
                !in_range(*treadle) || !shafts.iter().all(|shaft| in_range(*shaft))
            })
            .map(|(treadle, shafts)| format!("treadle {} -> shafts {:?}", treadle, shafts))
    }
}

impl PatternSection for Treadling {
    fn first_out_of_range(&self) -> Option<String> {
        self.iter()
            .find(|(pick, treadle)| !in_range(*pick) || !in_range(*treadle))
            .map(|(pick, treadle)| format!("pick {} -> treadle {}", pick, treadle))
    }
}

fn pattern<T: PatternSection>(name: &str, value: Value) -> DraftResult<T> {
    let section: T =
        serde_json::from_value(value).map_err(|e| DraftError::malformed_section(name, e))?;
    if let Some(entry) = section.first_out_of_range() {
        warn!(section = name, entry = %entry, "Rejecting out-of-range number in pattern section");
        return Err(DraftError::malformed_section(
            name,
            format!("numbers must lie in 1..={}, found {}", MAX_COUNT, entry),
        ));
    }
    Ok(section)
}

fn check_fields(name: &str, section: &Section) -> DraftResult<()> {
    let dimensions = [
        Dimension::Shaft,
        Dimension::Treadle,
        Dimension::Thread,
        Dimension::Pick,
    ];
    for dimension in dimensions {
        let (owner, field) = dimension.declared_field();
        if owner != name {
            continue;
        }
        if let Some(value) = section.get(field) {
            let valid = value
                .as_u64()
                .map_or(false, |n| n > 0 && n <= u64::from(MAX_COUNT));
            if !valid {
                return Err(DraftError::malformed_section(
                    name,
                    format!(
                        "'{}' must be an integer in 1..={}, found {}",
                        field, MAX_COUNT, value
                    ),
                ));
            }
        }
    }

    if name == WEAVING_SECTION {
        if let Some(value) = section.get("risingShed") {
            if !value.is_boolean() {
                return Err(DraftError::malformed_section(
                    name,
                    format!("'risingShed' must be a boolean, found {}", value),
                ));
            }
        }
    }

    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_malformed(result: DraftResult<Draft>) -> bool {
        matches!(result, Err(DraftError::MalformedInput { .. }))
    }

    #[test]
    fn test_empty_sections_rejected() {
        assert!(is_malformed(ingest(json!({ "sections": {} }))));
        assert!(!validate(&json!({ "sections": {} })));
    }

    #[test]
    fn test_structure_rejections() {
        assert!(is_malformed(ingest(json!([]))));
        assert!(is_malformed(ingest(json!({ "sections": [] }))));
        assert!(is_malformed(ingest(json!({ "wif": { "version": 1.1 } }))));
        assert!(is_malformed(ingest(json!({ "sections": { "wif": { "version": "1.1" } } }))));
        assert!(is_malformed(ingest(json!({ "sections": { "wif": { "version": 0 } } }))));
        assert!(is_malformed(parse("{ not json")));
    }

    #[test]
    fn test_minimal_draft_accepted() {
        let value = json!({ "sections": { "wif": { "version": 1.1 } } });
        assert!(validate(&value));

        let draft = ingest_ref(&value).unwrap();
        assert_eq!(draft.version(), Some(1.1));
        assert!(draft.threading().is_empty());
    }

    #[test]
    fn test_pattern_sections_typed() {
        let draft = parse(
            r#"{ "sections": {
                "wif": { "version": 1.1 },
                "threading": { "1": 1, "2": 2 },
                "tieup": { "1": [3, 1, 3] },
                "treadling": { "4": 2 }
            } }"#,
        )
        .unwrap();

        assert_eq!(draft.threading().shaft(2), Some(2));
        let shafts: Vec<u32> = draft.tieup().shafts(1).unwrap().iter().copied().collect();
        assert_eq!(shafts, vec![1, 3]);
        assert_eq!(draft.treadling().treadle(4), Some(2));
    }

    #[test]
    fn test_pattern_section_rejections() {
        let with = |name: &str, section: Value| {
            json!({ "sections": { "wif": { "version": 1.1 }, name: section } })
        };

        assert!(is_malformed(ingest(with("threading", json!({ "0": 1 })))));
        assert!(is_malformed(ingest(with("threading", json!({ "1": 0 })))));
        assert!(is_malformed(ingest(with("threading", json!({ "x": 1 })))));
        assert!(is_malformed(ingest(with("threading", json!({ "1": [1, 2] })))));
        assert!(is_malformed(ingest(with("tieup", json!({ "1": 3 })))));
        assert!(is_malformed(ingest(with("tieup", json!({ "1": [0] })))));
        assert!(is_malformed(ingest(with("treadling", json!({ "-1": 1 })))));
    }

    #[test]
    fn test_dimension_field_rejections() {
        let with = |name: &str, section: Value| {
            json!({ "sections": { "wif": { "version": 1.1 }, name: section } })
        };

        assert!(is_malformed(ingest(with("weaving", json!({ "shafts": 0 })))));
        assert!(is_malformed(ingest(with("weaving", json!({ "treadles": "4" })))));
        assert!(is_malformed(ingest(with("weaving", json!({ "risingShed": "yes" })))));
        assert!(is_malformed(ingest(with("warp", json!({ "threads": -3 })))));
        assert!(is_malformed(ingest(with("notes", json!("free text")))));

        let ok = ingest(with("weft", json!({ "threads": 12, "units": "centimeters" })));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_counts_above_limit_rejected() {
        let huge = json!({ "sections": {
            "wif": { "version": 1.1 },
            "warp": { "threads": 4294967295u64 },
            "weft": { "threads": 4294967295u64 }
        } });
        assert!(is_malformed(ingest(huge)));

        let with = |name: &str, section: Value| {
            json!({ "sections": { "wif": { "version": 1.1 }, name: section } })
        };
        let over = (MAX_COUNT + 1).to_string();
        assert!(is_malformed(ingest(with("weaving", json!({ "shafts": MAX_COUNT + 1 })))));
        assert!(is_malformed(ingest(with("threading", json!({ over.clone(): 1 })))));
        assert!(is_malformed(ingest(with("treadling", json!({ "1": MAX_COUNT + 1 })))));
        assert!(is_malformed(ingest(with("tieup", json!({ "1": [2, MAX_COUNT + 1] })))));

        let at_limit = ingest(with("warp", json!({ "threads": MAX_COUNT })));
        assert!(at_limit.is_ok());
    }

    #[test]
    fn test_untied_treadles_dropped() {
        let draft = ingest(json!({ "sections": {
            "wif": { "version": 1.1 },
            "tieup": { "1": [2], "9": [] }
        } }))
        .unwrap();

        assert_eq!(draft.tieup().len(), 1);
        assert!(draft.tieup().shafts(9).is_none());
        assert_eq!(draft.inferred(Dimension::Treadle), Some(1));
    }

    #[test]
    fn test_unknown_sections_kept_verbatim() {
        let draft = ingest(json!({ "sections": {
            "wif": { "version": 1.1 },
            "color table": { "1": [255, 0, 0] }
        } }))
        .unwrap();

        let colors = draft.section("color table").unwrap();
        assert_eq!(colors.get("1"), Some(&json!([255, 0, 0])));
    }

    #[test]
    fn test_create_default() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let draft = create_default_on(date);

        assert_eq!(draft.version(), Some(DEFAULT_WIF_VERSION));
        let wif = draft.section(WIF_SECTION).unwrap();
        assert_eq!(wif.get("date"), Some(&json!("Saturday, March 9, 2024")));
        assert_eq!(wif.get("sourceProgram"), Some(&json!(SOURCE_PROGRAM)));

        let contents = draft.section(CONTENTS_SECTION).unwrap();
        assert_eq!(contents.get("wif"), Some(&json!(true)));
        assert_eq!(contents.get("threading"), Some(&json!(false)));
        assert!(!draft.has_pattern(PatternKind::Threading));
    }
}
