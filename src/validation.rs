//! Validated input boundary for survey records.
//!
//! Survey documents are loosely typed: the records field may be missing or
//! hold the wrong JSON type, and individual records may lack fields. This
//! module makes a single pass over the raw [`serde_json::Value`] and yields
//! clean [`EntityRecord`]s together with the [`Diagnostic`]s describing what
//! was repaired or dropped. Nothing here returns an error; every anomaly has
//! a documented fallback:
//!
//! | Anomaly                          | Fallback                         |
//! |----------------------------------|----------------------------------|
//! | records value is not an array    | no records                       |
//! | record is not an object          | record skipped                   |
//! | no string `type` or `category`   | category `"Unknown"`             |
//! | `condition` not a string         | treated as absent (`"Unknown"`)  |
//! | `locations` not an array         | no locations (never matches)     |
//! | a location entry not a string    | entry dropped                    |

use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::core::{EntityRecord, UNKNOWN_CONDITION};

/// A repair applied while validating raw records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    NotASequence { found: &'static str },
    RecordNotObject { index: usize, found: &'static str },
    MissingCategory { index: usize },
    ConditionNotString { index: usize, found: &'static str },
    LocationsNotSequence { index: usize, found: &'static str },
    LocationNotString { index: usize, position: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence { found } => {
                write!(f, "records is not an array (found {found}); using no records")
            }
            Self::RecordNotObject { index, found } => {
                write!(f, "record {index} is not an object (found {found}); skipped")
            }
            Self::MissingCategory { index } => {
                write!(f, "record {index} has no type; using \"{UNKNOWN_CONDITION}\"")
            }
            Self::ConditionNotString { index, found } => {
                write!(f, "record {index} condition is {found}; treated as absent")
            }
            Self::LocationsNotSequence { index, found } => {
                write!(f, "record {index} locations is {found}; treated as empty")
            }
            Self::LocationNotString { index, position } => {
                write!(f, "record {index} location {position} is not a string; dropped")
            }
        }
    }
}

/// Typed records plus the repairs made to obtain them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRecords {
    pub records: Vec<EntityRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidatedRecords {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate a raw records value, logging every diagnostic at `warn`.
pub fn validate_records(value: &Value) -> ValidatedRecords {
    let validated = collect_records(value);
    for diagnostic in &validated.diagnostics {
        warn!(%diagnostic, "malformed survey record");
    }
    validated
}

fn collect_records(value: &Value) -> ValidatedRecords {
    let Some(items) = value.as_array() else {
        return ValidatedRecords {
            records: Vec::new(),
            diagnostics: vec![Diagnostic::NotASequence {
                found: json_kind(value),
            }],
        };
    };

    let mut validated = ValidatedRecords::default();
    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(fields) => {
                let record = record_from_fields(index, fields, &mut validated.diagnostics);
                validated.records.push(record);
            }
            None => validated.diagnostics.push(Diagnostic::RecordNotObject {
                index,
                found: json_kind(item),
            }),
        }
    }
    validated
}

fn record_from_fields(
    index: usize,
    fields: &Map<String, Value>,
    diagnostics: &mut Vec<Diagnostic>,
) -> EntityRecord {
    let category = match fields
        .get("type")
        .and_then(Value::as_str)
        .or_else(|| fields.get("category").and_then(Value::as_str))
    {
        Some(category) => category.to_string(),
        None => {
            diagnostics.push(Diagnostic::MissingCategory { index });
            UNKNOWN_CONDITION.to_string()
        }
    };

    let condition = match fields.get("condition") {
        None | Some(Value::Null) => None,
        Some(Value::String(condition)) => Some(condition.clone()),
        Some(other) => {
            diagnostics.push(Diagnostic::ConditionNotString {
                index,
                found: json_kind(other),
            });
            None
        }
    };

    let locations = match fields.get("locations") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| match entry.as_str() {
                Some(location) => Some(location.to_string()),
                None => {
                    diagnostics.push(Diagnostic::LocationNotString { index, position });
                    None
                }
            })
            .collect(),
        Some(other) => {
            diagnostics.push(Diagnostic::LocationsNotSequence {
                index,
                found: json_kind(other),
            });
            Vec::new()
        }
    };

    EntityRecord {
        category,
        condition,
        locations,
    }
}

fn json_kind(value: &Value) -> &'static str {
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
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_non_array_yields_empty_with_diagnostic() {
        for value in [Value::Null, json!({"type": "Pond"}), json!("records"), json!(3)] {
            let validated = validate_records(&value);
            assert!(validated.records.is_empty());
            assert_eq!(validated.diagnostics.len(), 1);
            assert!(matches!(
                validated.diagnostics[0],
                Diagnostic::NotASequence { .. }
            ));
        }
    }

    #[test]
    fn test_clean_records_pass_through() {
        let validated = validate_records(&json!([
            {"type": "Pond", "condition": "Clean", "locations": ["Alpha"]},
            {"category": "Well", "locations": []},
        ]));
        assert!(validated.is_clean());
        assert_eq!(
            validated.records,
            vec![
                EntityRecord::new("Pond", Some("Clean"), &["Alpha"]),
                EntityRecord::new("Well", None, &[]),
            ]
        );
    }

    #[test]
    fn test_missing_locations_is_not_a_diagnostic() {
        let validated = validate_records(&json!([{"type": "Pond", "condition": "Clean"}]));
        assert!(validated.is_clean());
        assert!(validated.records[0].locations.is_empty());
    }

    #[test]
    fn test_non_string_type_falls_back_to_category() {
        let validated = validate_records(&json!([
            {"type": null, "category": "Pond", "condition": "Clean"},
            {"type": 3, "category": "Well"},
        ]));
        assert!(validated.is_clean());
        assert_eq!(validated.records[0].category, "Pond");
        assert_eq!(validated.records[1].category, "Well");
    }

    #[test]
    fn test_repairs_are_reported() {
        let validated = validate_records(&json!([
            "not a record",
            {"condition": 7, "locations": "Alpha"},
            {"type": "Tank", "locations": ["Beta", 12]},
        ]));

        assert_eq!(validated.records.len(), 2);
        assert_eq!(
            validated.records[0],
            EntityRecord::new("Unknown", None, &[])
        );
        assert_eq!(validated.records[1], EntityRecord::new("Tank", None, &["Beta"]));
        assert_eq!(
            validated.diagnostics,
            vec![
                Diagnostic::RecordNotObject { index: 0, found: "a string" },
                Diagnostic::MissingCategory { index: 1 },
                Diagnostic::ConditionNotString { index: 1, found: "a number" },
                Diagnostic::LocationsNotSequence { index: 1, found: "a string" },
                Diagnostic::LocationNotString { index: 2, position: 1 },
            ]
        );
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(
            Diagnostic::NotASequence { found: "null" }.to_string(),
            "records is not an array (found null); using no records"
        );
        assert_eq!(
            Diagnostic::LocationNotString { index: 2, position: 0 }.to_string(),
            "record 2 location 0 is not a string; dropped"
        );
    }
}
