//! # JSON Schema Adapter
//!
//! Exposes a compiled JSON Schema (via the `jsonschema` crate) through the
//! [`Schema`] contract. Every violation becomes an [`Issue`] whose path is
//! decoded from the violation's JSON Pointer instance path.
//!
//! JSON Schema validates without transforming, so the parsed value of a
//! valid input is the input itself.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use stdfn_core::{Issue, Outcome, PathSegment, Schema};

use crate::document::{load_document, parse_document, DocumentFormat};
use crate::error::SchemaError;

/// Vendor name reported by [`JsonSchema`].
pub const VENDOR: &str = "jsonschema";

/// A compiled JSON Schema.
pub struct JsonSchema {
    validator: Validator,
    source: Value,
}

impl JsonSchema {
    /// Compile `schema`. The draft is detected from `$schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidSchema` if `schema` is not a valid
    /// JSON Schema document.
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .build(&schema)
            .map_err(|e| SchemaError::InvalidSchema {
                reason: e.to_string(),
            })?;
        tracing::debug!(id = ?schema.get("$id"), "compiled JSON Schema");
        Ok(Self {
            validator,
            source: schema,
        })
    }

    /// Parse and compile a schema from JSON or YAML text.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, SchemaError> {
        let schema =
            parse_document(text, format).map_err(|reason| SchemaError::InvalidSchema { reason })?;
        Self::new(schema)
    }

    /// Load and compile the schema file at `path` (JSON or YAML by extension).
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        Self::new(load_document(path)?)
    }

    /// The schema document this validator was compiled from.
    pub fn source(&self) -> &Value {
        &self.source
    }
}

impl Schema for JsonSchema {
    type Input = Value;
    type Output = Value;

    fn validate(&self, input: Value) -> Outcome<Value> {
        let issues: Vec<Issue> = self
            .validator
            .iter_errors(&input)
            .map(|e| Issue {
                message: e.to_string(),
                path: decode_instance_path(&e.instance_path.to_string(), &input),
            })
            .collect();
        Outcome::from_issues(issues, || input)
    }

    fn vendor(&self) -> &str {
        VENDOR
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Decode a JSON Pointer into path segments.
///
/// A pointer cannot tell `"0"` the key from `0` the index, so the instance
/// is walked alongside: a segment addressing an array becomes an index.
/// The empty pointer (the whole document) yields `None`.
fn decode_instance_path(pointer: &str, instance: &Value) -> Option<Vec<PathSegment>> {
    if pointer.is_empty() {
        return None;
    }

    let mut current = Some(instance);
    let mut path = Vec::new();
    for raw in pointer.split('/').skip(1) {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let segment = match (current, token.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                current = items.get(index);
                PathSegment::Index(index)
            }
            (Some(Value::Object(map)), _) => {
                current = map.get(&token);
                PathSegment::Key(token)
            }
            _ => {
                current = None;
                PathSegment::Key(token)
            }
        };
        path.push(segment);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo_json_schema() -> JsonSchema {
        JsonSchema::new(json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["taskName"],
            "properties": {
                "taskName": {"type": "string", "minLength": 1},
                "completed": {"type": "boolean"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn valid_input_is_returned_unchanged() {
        let input = json!({"taskName": "Task A", "extra": 1});
        match todo_json_schema().validate(input.clone()) {
            Outcome::Valid(value) => assert_eq!(value, input),
            other => panic!("Expected Valid, got: {other:?}"),
        }
    }

    #[test]
    fn missing_required_property_is_root_issue() {
        let issues = todo_json_schema().validate(json!({})).issues().cloned().unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues.first().path().is_empty());
        assert!(issues.first().message.contains("taskName"), "{}", issues.first());
    }

    #[test]
    fn nested_violation_paths_decode_indexes() {
        let issues = todo_json_schema()
            .validate(json!({"taskName": "x", "tags": ["a", 2]}))
            .issues()
            .cloned()
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues.first().path(),
            &[PathSegment::from("tags"), PathSegment::Index(1)]
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let issues = todo_json_schema()
            .validate(json!({"taskName": "", "completed": "no"}))
            .issues()
            .cloned()
            .unwrap();
        let paths: Vec<String> = issues
            .iter()
            .map(|i| i.path().iter().map(ToString::to_string).collect::<Vec<_>>().join("."))
            .collect();
        assert_eq!(issues.len(), 2);
        assert!(paths.contains(&"taskName".to_string()), "{paths:?}");
        assert!(paths.contains(&"completed".to_string()), "{paths:?}");
    }

    #[test]
    fn invalid_schema_is_rejected() {
        let err = JsonSchema::new(json!({"type": 12})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { .. }), "{err}");
    }

    #[test]
    fn parses_yaml_schema_text() {
        let schema = JsonSchema::parse("type: string\nminLength: 2\n", DocumentFormat::Yaml).unwrap();
        assert!(schema.validate(json!("ok")).is_valid());
        assert!(schema.validate(json!("o")).issues().is_some());
        assert_eq!(schema.vendor(), VENDOR);
    }

    #[test]
    fn decode_pointer_escapes_and_keys() {
        let instance = json!({"a/b": {"~k": [1, {"0": true}]}});
        assert_eq!(decode_instance_path("", &instance), None);
        assert_eq!(
            decode_instance_path("/a~1b/~0k/1/0", &instance),
            Some(vec![
                PathSegment::from("a/b"),
                PathSegment::from("~k"),
                PathSegment::Index(1),
                PathSegment::from("0"),
            ])
        );
    }
}
