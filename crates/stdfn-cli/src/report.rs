//! # Failure Reporting
//!
//! Renders a failed validated-function call for the terminal or as JSON.

use clap::ValueEnum;
use serde_json::json;
use stdfn_core::CallError;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per issue, prefixed with its path.
    #[default]
    Pretty,
    /// A single JSON object.
    Json,
}

/// Render `err` in `format`.
pub fn render_failure<E>(err: &CallError<E>, format: OutputFormat) -> String
where
    E: std::error::Error,
{
    match format {
        OutputFormat::Pretty => match err.invalid_parameters() {
            Some(invalid) => invalid
                .issues()
                .iter()
                .map(|issue| format!("  {issue}"))
                .collect::<Vec<_>>()
                .join("\n"),
            None => format!("  {err}"),
        },
        OutputFormat::Json => {
            let issues = err.invalid_parameters().map(|invalid| invalid.issues());
            let body = json!({
                "kind": err.kind(),
                "message": err.to_string(),
                "issues": issues,
            });
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stdfn_core::{InvalidParametersError, Issue, Issues};

    fn invalid() -> CallError {
        InvalidParametersError::new(
            Issues::new(vec![Issue::at("Required", ["taskName"]), Issue::new("Bad input")]).unwrap(),
        )
        .into()
    }

    #[test]
    fn pretty_lists_issues_with_paths() {
        assert_eq!(
            render_failure(&invalid(), OutputFormat::Pretty),
            "  taskName: Required\n  Bad input"
        );
    }

    #[test]
    fn json_carries_kind_message_and_issues() {
        let rendered = render_failure(&invalid(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["kind"], "invalid_parameters");
        assert_eq!(value["message"], "Invalid parameters: Required, Bad input");
        assert_eq!(value["issues"][0]["path"], json!(["taskName"]));
        assert_eq!(value["issues"][1], json!({"message": "Bad input"}));
    }

    #[test]
    fn unsupported_async_has_null_issues() {
        let err: CallError = CallError::UnsupportedAsyncValidation;
        let value: serde_json::Value =
            serde_json::from_str(&render_failure(&err, OutputFormat::Json)).unwrap();
        assert_eq!(value["kind"], "unsupported_async_validation");
        assert_eq!(value["message"], "Promises are not supported in results.");
        assert!(value["issues"].is_null());
        assert_eq!(
            render_failure(&err, OutputFormat::Pretty),
            "  Promises are not supported in results."
        );
    }
}
