//! # Typed Output
//!
//! [`Typed`] wraps a schema producing `serde_json::Value` and deserializes
//! the parsed value into a Rust type. Deserialization failures surface as
//! a single root-level issue, so a validated function over a `Typed`
//! schema still fails with invalid parameters rather than a panic.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stdfn_core::{Deferred, Issue, Issues, Outcome, Schema};

/// A schema whose parsed JSON value is deserialized into `T`.
pub struct Typed<S, T> {
    inner: S,
    _marker: PhantomData<fn() -> T>,
}

impl<S, T> Typed<S, T> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// The wrapped schema.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Clone, T> Clone for Typed<S, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<S: fmt::Debug, T> fmt::Debug for Typed<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("inner", &self.inner)
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<S, T> Schema for Typed<S, T>
where
    S: Schema<Output = Value>,
    T: DeserializeOwned + 'static,
{
    type Input = S::Input;
    type Output = T;

    fn validate(&self, input: S::Input) -> Outcome<T> {
        deserialize(self.inner.validate(input))
    }

    fn vendor(&self) -> &str {
        self.inner.vendor()
    }

    fn version(&self) -> u32 {
        self.inner.version()
    }
}

fn deserialize<T>(outcome: Outcome<Value>) -> Outcome<T>
where
    T: DeserializeOwned + 'static,
{
    match outcome {
        Outcome::Valid(value) => serde_json::from_value::<T>(value)
            .map_err(|e| Issues::single(Issue::new(e.to_string())))
            .into(),
        Outcome::Invalid(issues) => Outcome::Invalid(issues),
        Outcome::Deferred(pending) => Outcome::Deferred(Deferred::new(async move {
            deserialize(pending.into_inner().await)
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{number, object, string};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn deserializes_parsed_value() {
        let schema = object([("x", number()), ("y", number())]).typed::<Point>();
        match schema.validate(json!({"x": 1, "y": -2})) {
            Outcome::Valid(point) => assert_eq!(point, Point { x: 1, y: -2 }),
            other => panic!("Expected Valid, got: {other:?}"),
        }
    }

    #[test]
    fn schema_issues_pass_through() {
        let schema = object([("x", number()), ("y", number())]).typed::<Point>();
        let issues = schema.validate(json!({"x": 1})).issues().cloned().unwrap();
        assert_eq!(issues.as_slice(), &[Issue::at("Required", ["y"])]);
    }

    #[test]
    fn deserialize_failure_becomes_root_issue() {
        let schema = object([("x", number()), ("y", number())]).typed::<Point>();
        let issues = schema.validate(json!({"x": 1.5, "y": 2})).issues().cloned().unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues.first().path().is_empty());
        assert!(issues.first().message.contains("i64"), "{}", issues.first());
    }

    #[test]
    fn deferred_stays_deferred() {
        let schema = string()
            .transform_deferred(|v| async move { v })
            .typed::<String>();
        assert!(schema.validate(json!("x")).is_deferred());
    }

    #[test]
    fn vendor_is_inner_vendor() {
        assert_eq!(string().typed::<String>().vendor(), crate::value::VENDOR);
    }
}
