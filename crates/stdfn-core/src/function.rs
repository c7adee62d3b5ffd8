//! # Validated Functions
//!
//! [`make_function`] pairs a [`Schema`] with an implementation. The
//! resulting [`ValidatedFn`] validates raw input on every call and only
//! then hands the parsed value to the implementation.
//!
//! ## Call Semantics
//!
//! 1. The schema is asked to validate the input exactly once.
//! 2. A deferred outcome fails the call with
//!    [`CallError::UnsupportedAsyncValidation`]. The deferred value is
//!    dropped without being polled.
//! 3. An invalid outcome fails the call with
//!    [`CallError::InvalidParameters`], carrying the schema's issues in
//!    their original order.
//! 4. Otherwise the implementation runs with the parsed value and its
//!    result is returned as is.
//!
//! A `ValidatedFn` holds no mutable state. Calls are independent and,
//! provided the implementation is reentrant, safe from multiple threads.

use std::fmt;

use crate::error::{CallError, InvalidParametersError};
use crate::schema::{Outcome, Schema};

/// Wrap `implementation` so its input is validated by `schema` first.
///
/// ```
/// use stdfn_core::{make_function, Issue, Issues, Outcome, Schema};
///
/// struct NonEmpty;
///
/// impl Schema for NonEmpty {
///     type Input = String;
///     type Output = String;
///
///     fn validate(&self, input: String) -> Outcome<String> {
///         if input.is_empty() {
///             Outcome::Invalid(Issues::single(Issue::new("Required")))
///         } else {
///             Outcome::Valid(input)
///         }
///     }
/// }
///
/// let shout = make_function(NonEmpty, |s: String| s.to_uppercase());
/// assert_eq!(shout.call("test".to_string()).unwrap(), "TEST");
/// assert_eq!(
///     shout.call(String::new()).unwrap_err().to_string(),
///     "Invalid parameters: Required"
/// );
/// ```
pub fn make_function<S, F>(schema: S, implementation: F) -> ValidatedFn<S, F>
where
    S: Schema,
{
    ValidatedFn {
        schema,
        implementation,
    }
}

/// A function whose input is validated by a schema before it runs.
///
/// Built by [`make_function`].
#[derive(Clone)]
pub struct ValidatedFn<S, F> {
    schema: S,
    implementation: F,
}

impl<S, F> ValidatedFn<S, F>
where
    S: Schema,
{
    /// Validate `input`, then run the implementation on the parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidParameters`] if the schema reports issues
    /// and [`CallError::UnsupportedAsyncValidation`] if the schema returns a
    /// deferred outcome. The implementation is not run in either case.
    pub fn call<R>(&self, input: S::Input) -> Result<R, CallError>
    where
        F: Fn(S::Output) -> R,
    {
        let parsed = self.parse(input)?;
        Ok((self.implementation)(parsed))
    }

    /// Like [`call`](Self::call) for implementations returning `Result`.
    ///
    /// The implementation's error is returned unchanged inside
    /// [`CallError::Implementation`].
    pub fn try_call<T, E>(&self, input: S::Input) -> Result<T, CallError<E>>
    where
        F: Fn(S::Output) -> Result<T, E>,
    {
        let parsed = match self.parse(input) {
            Ok(parsed) => parsed,
            Err(err) => return Err(err.widen()),
        };
        (self.implementation)(parsed).map_err(CallError::Implementation)
    }

    /// The schema validating this function's input.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Convert into a plain closure with the same behaviour as
    /// [`call`](Self::call).
    pub fn into_fn<R>(self) -> impl Fn(S::Input) -> Result<R, CallError>
    where
        F: Fn(S::Output) -> R,
    {
        move |input| self.call(input)
    }

    fn parse(&self, input: S::Input) -> Result<S::Output, CallError> {
        match self.schema.validate(input) {
            Outcome::Valid(value) => Ok(value),
            Outcome::Invalid(issues) => Err(InvalidParametersError::new(issues).into()),
            Outcome::Deferred(_) => Err(CallError::UnsupportedAsyncValidation),
        }
    }
}

impl<S, F> fmt::Debug for ValidatedFn<S, F>
where
    S: Schema,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedFn")
            .field("vendor", &self.schema.vendor())
            .field("version", &self.schema.version())
            .finish_non_exhaustive()
    }
}
