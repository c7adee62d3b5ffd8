//! # Check Subcommand
//!
//! Validates one document against a JSON Schema. The schema is compiled
//! once, wrapped with `make_function`, and the validated function is
//! called with the loaded document. Schema and document may each be JSON
//! or YAML.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use stdfn_core::{make_function, CallError};
use stdfn_schema::{load_document, JsonSchema};

use crate::report::{render_failure, OutputFormat};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON Schema file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub schema: PathBuf,

    /// Document to validate (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Validate `input` against `schema` through a validated function.
///
/// On success the document is returned as parsed.
pub fn check_document(schema: JsonSchema, input: Value) -> Result<Value, CallError> {
    let accept = make_function(schema, |document: Value| document);
    accept.call(input)
}

/// Render a successful check in `format`.
pub fn render_success(
    document: &Value,
    input: &Path,
    format: OutputFormat,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Pretty => format!("valid: {}", input.display()),
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
    })
}

/// Run the check subcommand.
pub fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let schema = JsonSchema::from_file(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let input = load_document(&args.input)
        .with_context(|| format!("loading document {}", args.input.display()))?;

    match check_document(schema, input) {
        Ok(document) => {
            tracing::info!(input = %args.input.display(), "document is valid");
            println!("{}", render_success(&document, &args.input, args.format)?);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(input = %args.input.display(), kind = %err.kind(), "document rejected");
            println!("{}", render_failure(&err, args.format));
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn schema() -> JsonSchema {
        JsonSchema::new(json!({
            "type": "object",
            "required": ["name"],
            "properties": {"name": {"type": "string"}}
        }))
        .unwrap()
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_document_passes_through() {
        let doc = json!({"name": "a", "other": [1, 2]});
        assert_eq!(check_document(schema(), doc.clone()).unwrap(), doc);
    }

    #[test]
    fn invalid_document_is_invalid_parameters() {
        let err = check_document(schema(), json!({"name": 1})).unwrap_err();
        assert!(err.is_invalid_parameters());
        let issues = err.invalid_parameters().unwrap().issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path(), &[stdfn_core::PathSegment::from("name")]);
    }

    #[test]
    fn pretty_success_names_the_input() {
        let rendered =
            render_success(&json!({"name": "a"}), Path::new("doc.yaml"), OutputFormat::Pretty).unwrap();
        assert_eq!(rendered, "valid: doc.yaml");
    }

    #[test]
    fn json_success_prints_the_document() {
        let doc = json!({"name": "a"});
        let rendered = render_success(&doc, Path::new("doc.json"), OutputFormat::Json).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&rendered).unwrap(), doc);
    }

    #[test]
    fn run_accepts_yaml_files() {
        let schema_file = write_temp(".yaml", "type: object\nrequired: [name]\n");
        let input_file = write_temp(".yml", "name: test\n");
        let args = CheckArgs {
            schema: schema_file.path().to_path_buf(),
            input: input_file.path().to_path_buf(),
            format: OutputFormat::Json,
        };
        run(&args).unwrap();
    }

    #[test]
    fn run_fails_on_invalid_document() {
        let schema_file = write_temp(".json", r#"{"type": "object", "required": ["name"]}"#);
        let input_file = write_temp(".json", "{}");
        let args = CheckArgs {
            schema: schema_file.path().to_path_buf(),
            input: input_file.path().to_path_buf(),
            format: OutputFormat::Pretty,
        };
        let err = run(&args).unwrap_err();
        let call_err = err.downcast_ref::<CallError>().expect("call error");
        assert!(call_err.is_invalid_parameters());
    }

    #[test]
    fn run_reports_missing_schema_file() {
        let input_file = write_temp(".json", "{}");
        let args = CheckArgs {
            schema: PathBuf::from("/nonexistent/stdfn/schema.json"),
            input: input_file.path().to_path_buf(),
            format: OutputFormat::Pretty,
        };
        let err = run(&args).unwrap_err();
        assert!(err.to_string().starts_with("loading schema"), "{err}");
    }
}
