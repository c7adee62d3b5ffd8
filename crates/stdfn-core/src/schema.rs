//! # Schema Contract
//!
//! The [`Schema`] trait is the single capability every schema provider
//! exposes: given raw input, synchronously produce an [`Outcome`].
//!
//! ## Outcomes
//!
//! - [`Outcome::Valid`] carries the parsed value, including any default
//!   substitution or transformation the schema performed.
//! - [`Outcome::Invalid`] carries a non-empty, ordered [`Issues`] sequence.
//! - [`Outcome::Deferred`] carries a value that is not yet available. It is
//!   part of the contract so providers can express asynchronous validation,
//!   but validated functions refuse it without polling.
//!
//! Providers are free to implement parsing, coercion and defaults however
//! they like; consumers depend only on this trait.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::issue::{Issue, Issues};

/// Contract version implemented by every [`Schema`].
pub const CONTRACT_VERSION: u32 = 1;

/// A validation schema.
pub trait Schema {
    /// Raw input accepted by [`validate`](Schema::validate).
    type Input;
    /// Parsed value produced by a successful validation.
    type Output;

    /// Validate `input`.
    fn validate(&self, input: Self::Input) -> Outcome<Self::Output>;

    /// Name of the library providing this schema.
    fn vendor(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Version of the schema contract. Always [`CONTRACT_VERSION`].
    fn version(&self) -> u32 {
        CONTRACT_VERSION
    }
}

/// Result of a single [`Schema::validate`] call.
#[must_use]
pub enum Outcome<T> {
    /// Validation succeeded with the parsed value.
    Valid(T),
    /// Validation failed.
    Invalid(Issues),
    /// Validation result is only available asynchronously.
    Deferred(Deferred<T>),
}

impl<T> Outcome<T> {
    /// Failure outcome from `issues`, or `Valid(value())` when `issues`
    /// is empty.
    pub fn from_issues(issues: Vec<Issue>, value: impl FnOnce() -> T) -> Self {
        match Issues::new(issues) {
            Some(issues) => Self::Invalid(issues),
            None => Self::Valid(value()),
        }
    }

    /// Returns `true` for [`Outcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns `true` for [`Outcome::Deferred`].
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Map the parsed value. Deferred outcomes map once they resolve.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self {
            Self::Valid(value) => Outcome::Valid(f(value)),
            Self::Invalid(issues) => Outcome::Invalid(issues),
            Self::Deferred(deferred) => Outcome::Deferred(deferred.map(f)),
        }
    }

    /// Issues of an invalid outcome.
    pub fn issues(&self) -> Option<&Issues> {
        match self {
            Self::Invalid(issues) => Some(issues),
            _ => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(value) => f.debug_tuple("Valid").field(value).finish(),
            Self::Invalid(issues) => f.debug_tuple("Invalid").field(issues).finish(),
            Self::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
        }
    }
}

impl<T> From<Result<T, Issues>> for Outcome<T> {
    fn from(result: Result<T, Issues>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(issues) => Self::Invalid(issues),
        }
    }
}

type BoxOutcomeFuture<T> = Pin<Box<dyn Future<Output = Outcome<T>> + Send>>;

/// A validation outcome that will only be known after awaiting.
pub struct Deferred<T> {
    future: BoxOutcomeFuture<T>,
}

impl<T> Deferred<T> {
    /// Wrap a future resolving to the eventual outcome.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// Consumes self and returns the boxed future.
    pub fn into_inner(self) -> BoxOutcomeFuture<T> {
        self.future
    }

    fn map<U, F>(self, f: F) -> Deferred<U>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let future = self.future;
        Deferred::new(async move { future.await.map(f) })
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

impl<S: Schema + ?Sized> Schema for &S {
    type Input = S::Input;
    type Output = S::Output;

    fn validate(&self, input: Self::Input) -> Outcome<Self::Output> {
        (**self).validate(input)
    }

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn validate(&self, input: Self::Input) -> Outcome<Self::Output> {
        (**self).validate(input)
    }

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn validate(&self, input: Self::Input) -> Outcome<Self::Output> {
        (**self).validate(input)
    }

    fn vendor(&self) -> &str {
        (**self).vendor()
    }

    fn version(&self) -> u32 {
        (**self).version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl Schema for Even {
        type Input = i64;
        type Output = i64;

        fn validate(&self, input: i64) -> Outcome<i64> {
            if input % 2 == 0 {
                Outcome::Valid(input)
            } else {
                Outcome::Invalid(Issues::single(Issue::new("Expected an even number")))
            }
        }
    }

    #[test]
    fn from_issues_with_no_issues_is_valid() {
        let outcome = Outcome::from_issues(Vec::new(), || 7);
        assert!(matches!(outcome, Outcome::Valid(7)));
    }

    #[test]
    fn from_issues_with_issues_is_invalid() {
        let outcome = Outcome::from_issues(vec![Issue::new("nope")], || 7);
        assert_eq!(outcome.issues().map(Issues::len), Some(1));
    }

    #[test]
    fn map_applies_only_to_valid_values() {
        assert!(matches!(Outcome::Valid(2).map(|n: i32| n * 10), Outcome::Valid(20)));
        let invalid: Outcome<i32> = Outcome::Invalid(Issues::single(Issue::new("bad")));
        assert!(invalid.map(|n| n * 10).issues().is_some());
    }

    #[test]
    fn map_keeps_deferred_deferred() {
        let deferred = Outcome::Deferred(Deferred::new(async { Outcome::Valid(1) }));
        assert!(deferred.map(|n: i32| n + 1).is_deferred());
    }

    #[test]
    fn pointer_impls_delegate() {
        let boxed: Box<dyn Schema<Input = i64, Output = i64>> = Box::new(Even);
        assert!(boxed.validate(4).is_valid());
        assert!(!(&Even).validate(3).is_valid());
        assert!(Arc::new(Even).validate(8).is_valid());
    }

    #[test]
    fn default_vendor_and_version() {
        assert!(Even.vendor().ends_with("Even"));
        assert_eq!(Even.version(), CONTRACT_VERSION);
        let by_ref = &Even;
        assert_eq!(by_ref.vendor(), Even.vendor());
    }
}
