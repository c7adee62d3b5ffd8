//! # Error Types
//!
//! Failures surfaced by a validated function. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Taxonomy
//!
//! - [`InvalidParametersError`]: the schema reported one or more issues.
//!   Carries the issues verbatim plus an aggregated message.
//! - [`CallError::UnsupportedAsyncValidation`]: the schema returned a
//!   deferred outcome.
//! - [`CallError::Implementation`]: the wrapped implementation failed.
//!   Passed through untouched.
//!
//! Callers branch on [`CallError::kind`], never on message text.

use std::convert::Infallible;

use serde::Serialize;
use thiserror::Error;

use crate::issue::{Issue, Issues};

/// Message prefix of every [`InvalidParametersError`].
pub const INVALID_PARAMETERS_PREFIX: &str = "Invalid parameters: ";

/// Message of [`CallError::UnsupportedAsyncValidation`].
pub const UNSUPPORTED_ASYNC_MESSAGE: &str = "Promises are not supported in results.";

/// The schema rejected the input.
///
/// The message is computed once at construction:
/// `"Invalid parameters: "` followed by every issue message joined by `", "`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct InvalidParametersError {
    message: String,
    issues: Issues,
}

impl InvalidParametersError {
    /// Stable name of this error kind.
    pub const NAME: &'static str = "InvalidParametersError";

    /// Build the error from the issues reported by a schema.
    pub fn new(issues: Issues) -> Self {
        let joined = issues
            .iter()
            .map(|issue| issue.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            message: format!("{INVALID_PARAMETERS_PREFIX}{joined}"),
            issues,
        }
    }

    /// The aggregated message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The issues, in the order the schema reported them.
    pub fn issues(&self) -> &[Issue] {
        self.issues.as_slice()
    }

    /// Consumes self and returns the issues.
    pub fn into_issues(self) -> Issues {
        self.issues
    }
}

impl From<Issues> for InvalidParametersError {
    fn from(issues: Issues) -> Self {
        Self::new(issues)
    }
}

/// Discriminator for [`CallError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The schema reported issues.
    InvalidParameters,
    /// The schema returned a deferred outcome.
    UnsupportedAsyncValidation,
    /// The implementation failed.
    Implementation,
}

impl ErrorKind {
    /// Stable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameters => InvalidParametersError::NAME,
            Self::UnsupportedAsyncValidation => "UnsupportedAsyncValidation",
            Self::Implementation => "Implementation",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a validated function call.
///
/// `E` is the implementation's own error type; it defaults to
/// [`Infallible`] for implementations that cannot fail.
#[derive(Error, Debug)]
pub enum CallError<E = Infallible> {
    /// The schema reported issues for the input.
    #[error(transparent)]
    InvalidParameters(#[from] InvalidParametersError),

    /// The schema returned a deferred outcome. It was not awaited.
    #[error("Promises are not supported in results.")]
    UnsupportedAsyncValidation,

    /// The implementation returned an error.
    #[error(transparent)]
    Implementation(E),
}

impl<E> CallError<E> {
    /// The kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::UnsupportedAsyncValidation => ErrorKind::UnsupportedAsyncValidation,
            Self::Implementation(_) => ErrorKind::Implementation,
        }
    }

    /// Returns `true` if the schema rejected the input.
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, Self::InvalidParameters(_))
    }

    /// The invalid-parameters error, if that is what this is.
    pub fn invalid_parameters(&self) -> Option<&InvalidParametersError> {
        match self {
            Self::InvalidParameters(err) => Some(err),
            _ => None,
        }
    }

    /// The implementation error, if that is what this is.
    pub fn into_implementation(self) -> Option<E> {
        match self {
            Self::Implementation(err) => Some(err),
            _ => None,
        }
    }
}

impl CallError<Infallible> {
    /// Widen an infallible call error into one carrying `E`.
    pub fn widen<E>(self) -> CallError<E> {
        match self {
            Self::InvalidParameters(err) => CallError::InvalidParameters(err),
            Self::UnsupportedAsyncValidation => CallError::UnsupportedAsyncValidation,
            Self::Implementation(never) => match never {},
        }
    }
}
