//! # Document Loading
//!
//! Reads JSON or YAML files into `serde_json::Value`. The format is chosen
//! by extension: `.yaml` / `.yml` are YAML, everything else is JSON.

use std::path::Path;

use serde_json::Value;

use crate::error::SchemaError;

/// Document formats understood by [`load_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (JSON-compatible subset).
    Yaml,
}

impl DocumentFormat {
    /// Format implied by the extension of `path`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse `text` as a document in `format`.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}")),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| format!("invalid YAML: {e}")),
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns `SchemaError::DocumentLoad` if the file cannot be read or does
/// not parse in the format implied by its extension.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    let value = parse_document(&content, DocumentFormat::from_path(path)).map_err(|reason| {
        SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        }
    })?;

    tracing::debug!(path = %path.display(), "loaded document");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Json);
    }

    #[test]
    fn loads_yaml_and_json_alike() {
        let yaml = write_temp(".yaml", "taskName: Task A\ncompleted: true\n");
        let json_file = write_temp(".json", r#"{"taskName": "Task A", "completed": true}"#);
        let expected = json!({"taskName": "Task A", "completed": true});
        assert_eq!(load_document(yaml.path()).unwrap(), expected);
        assert_eq!(load_document(json_file.path()).unwrap(), expected);
    }

    #[test]
    fn malformed_document_reports_path_and_reason() {
        let file = write_temp(".json", "{not json");
        let err = load_document(file.path()).unwrap_err();
        match err {
            SchemaError::DocumentLoad { path, reason } => {
                assert!(path.ends_with(".json"));
                assert!(reason.starts_with("invalid JSON"), "{reason}");
            }
            other => panic!("Expected DocumentLoad, got: {other}"),
        }
    }

    #[test]
    fn missing_file_is_document_load_error() {
        let err = load_document(Path::new("/nonexistent/stdfn/doc.json")).unwrap_err();
        assert!(matches!(err, SchemaError::DocumentLoad { .. }));
    }
}
