//! # JSON Value Combinators
//!
//! A small schema builder over `serde_json::Value`, in the style of the
//! object/string/boolean builders common to schema libraries.
//!
//! ```
//! use serde_json::{json, Value};
//! use stdfn_core::{Outcome, Schema};
//! use stdfn_schema::value::{boolean, object, string};
//!
//! let schema = object([
//!     ("name", string()),
//!     ("enabled", boolean().optional(Value::Bool(true))),
//! ]);
//! let Outcome::Valid(parsed) = schema.validate(json!({"name": "test"})) else {
//!     panic!("expected a valid outcome");
//! };
//! assert_eq!(parsed, json!({"name": "test", "enabled": true}));
//! ```
//!
//! ## Messages
//!
//! - An absent required value reports `Required`.
//! - A value of the wrong type reports `Expected <type>, received <type>`.
//! - Composite schemas report every failing member, re-rooted under the
//!   member's key or index, in declaration order.
//!
//! ## Absent vs null
//!
//! Object fields that are missing are "absent", which only
//! [`ValueSchema::optional`] accepts. An explicit `null` is a value and
//! is only accepted by [`ValueSchema::nullable`] (or [`any`]).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use stdfn_core::{Deferred, Issue, Issues, Outcome, PathSegment, Schema};

use crate::typed::Typed;

/// Vendor name reported by [`ValueSchema`].
pub const VENDOR: &str = "stdfn";

/// A type-erased schema over JSON values.
pub type BoxedSchema = Box<dyn Schema<Input = Value, Output = Value> + Send + Sync>;

type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;
type BoxValueFuture = Pin<Box<dyn Future<Output = Value> + Send>>;
type DeferredTransformFn = Arc<dyn Fn(Value) -> BoxValueFuture + Send + Sync>;

enum Node {
    Any,
    String,
    Boolean,
    Number,
    Object(Vec<(String, ValueSchema)>),
    Array(ValueSchema),
    Optional { inner: ValueSchema, default: Value },
    Nullable(ValueSchema),
    MinLength {
        inner: ValueSchema,
        min: usize,
        message: String,
    },
    Transform {
        inner: ValueSchema,
        transform: TransformFn,
    },
    DeferredTransform {
        inner: ValueSchema,
        transform: DeferredTransformFn,
    },
}

/// A composable schema over JSON values.
///
/// Cheap to clone; clones share the same definition.
#[derive(Clone)]
pub struct ValueSchema {
    node: Arc<Node>,
}

/// Accepts any present value, including `null`.
pub fn any() -> ValueSchema {
    ValueSchema::from_node(Node::Any)
}

/// Accepts strings.
pub fn string() -> ValueSchema {
    ValueSchema::from_node(Node::String)
}

/// Accepts booleans.
pub fn boolean() -> ValueSchema {
    ValueSchema::from_node(Node::Boolean)
}

/// Accepts numbers.
pub fn number() -> ValueSchema {
    ValueSchema::from_node(Node::Number)
}

/// Accepts objects with the declared fields.
///
/// Fields are validated in declaration order. Undeclared keys are dropped
/// from the parsed value.
pub fn object<I, K>(fields: I) -> ValueSchema
where
    I: IntoIterator<Item = (K, ValueSchema)>,
    K: Into<String>,
{
    let fields = fields.into_iter().map(|(k, s)| (k.into(), s)).collect();
    ValueSchema::from_node(Node::Object(fields))
}

/// Accepts arrays whose every element matches `item`.
pub fn array(item: ValueSchema) -> ValueSchema {
    ValueSchema::from_node(Node::Array(item))
}

impl ValueSchema {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Substitute `default` when the value is absent.
    pub fn optional(self, default: Value) -> Self {
        Self::from_node(Node::Optional {
            inner: self,
            default,
        })
    }

    /// Accept `null` as well.
    pub fn nullable(self) -> Self {
        Self::from_node(Node::Nullable(self))
    }

    /// Require strings (in characters) or arrays (in elements) to have at
    /// least `min` entries, reporting `message` otherwise.
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        Self::from_node(Node::MinLength {
            inner: self,
            min,
            message: message.into(),
        })
    }

    /// Map the parsed value through `transform`.
    pub fn transform<F>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::from_node(Node::Transform {
            inner: self,
            transform: Arc::new(transform),
        })
    }

    /// Map the parsed value through an asynchronous `transform`.
    ///
    /// Validation through this schema yields a deferred outcome.
    pub fn transform_deferred<F, Fut>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        Self::from_node(Node::DeferredTransform {
            inner: self,
            transform: Arc::new(move |value| -> BoxValueFuture { Box::pin(transform(value)) }),
        })
    }

    /// Erase the concrete schema type.
    pub fn boxed(self) -> BoxedSchema {
        Box::new(self)
    }

    /// Deserialize the parsed value into `T`.
    pub fn typed<T>(self) -> Typed<Self, T> {
        Typed::new(self)
    }

    /// Validate a possibly absent value.
    pub fn validate_field(&self, input: Option<Value>) -> Outcome<Value> {
        match &*self.node {
            Node::Optional { inner, default } => match input {
                None => Outcome::Valid(default.clone()),
                Some(value) => inner.validate_field(Some(value)),
            },
            Node::Nullable(inner) => match input {
                Some(Value::Null) => Outcome::Valid(Value::Null),
                other => inner.validate_field(other),
            },
            Node::MinLength {
                inner,
                min,
                message,
            } => match inner.validate_field(input) {
                Outcome::Valid(value) if length(&value).is_some_and(|len| len < *min) => {
                    Outcome::Invalid(Issues::single(Issue::new(message.clone())))
                }
                other => other,
            },
            Node::Transform { inner, transform } => {
                let transform = Arc::clone(transform);
                inner.validate_field(input).map(move |value| transform(value))
            }
            Node::DeferredTransform { inner, transform } => {
                deferred_transform(inner.validate_field(input), Arc::clone(transform))
            }
            _ => match input {
                None => Outcome::Invalid(Issues::single(Issue::new("Required"))),
                Some(value) => self.check_present(value),
            },
        }
    }

    fn check_present(&self, value: Value) -> Outcome<Value> {
        match (&*self.node, value) {
            (Node::Any, value) => Outcome::Valid(value),
            (Node::String, value @ Value::String(_)) => Outcome::Valid(value),
            (Node::Boolean, value @ Value::Bool(_)) => Outcome::Valid(value),
            (Node::Number, value @ Value::Number(_)) => Outcome::Valid(value),
            (Node::Object(fields), Value::Object(mut map)) => {
                let results = fields
                    .iter()
                    .map(|(key, schema)| {
                        (PathSegment::Key(key.clone()), schema.validate_field(map.remove(key)))
                    })
                    .collect();
                combine(results, build_object)
            }
            (Node::Array(item), Value::Array(elements)) => {
                let results = elements
                    .into_iter()
                    .enumerate()
                    .map(|(i, element)| (PathSegment::Index(i), item.validate_field(Some(element))))
                    .collect();
                combine(results, build_array)
            }
            (_, value) => Outcome::Invalid(Issues::single(Issue::new(format!(
                "Expected {}, received {}",
                self.expected(),
                type_name(&value)
            )))),
        }
    }

    fn expected(&self) -> &'static str {
        match &*self.node {
            Node::Any => "any",
            Node::String => "string",
            Node::Boolean => "boolean",
            Node::Number => "number",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::Optional { inner, .. }
            | Node::Nullable(inner)
            | Node::MinLength { inner, .. }
            | Node::Transform { inner, .. }
            | Node::DeferredTransform { inner, .. } => inner.expected(),
        }
    }
}

impl Schema for ValueSchema {
    type Input = Value;
    type Output = Value;

    fn validate(&self, input: Value) -> Outcome<Value> {
        self.validate_field(Some(input))
    }

    fn vendor(&self) -> &str {
        VENDOR
    }
}

impl fmt::Debug for ValueSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueSchema").field(&self.expected()).finish()
    }
}

fn deferred_transform(outcome: Outcome<Value>, transform: DeferredTransformFn) -> Outcome<Value> {
    match outcome {
        Outcome::Valid(value) => {
            let pending = transform(value);
            Outcome::Deferred(Deferred::new(async move { Outcome::Valid(pending.await) }))
        }
        Outcome::Invalid(issues) => Outcome::Invalid(issues),
        Outcome::Deferred(pending) => Outcome::Deferred(Deferred::new(async move {
            match pending.into_inner().await {
                Outcome::Valid(value) => Outcome::Valid(transform(value).await),
                other => other,
            }
        })),
    }
}

/// Merge member outcomes into one, re-rooting member issues.
///
/// If any member is deferred the whole result is deferred and resolves
/// once every member has.
fn combine(
    results: Vec<(PathSegment, Outcome<Value>)>,
    build: fn(Vec<(PathSegment, Value)>) -> Value,
) -> Outcome<Value> {
    if !results.iter().any(|(_, outcome)| outcome.is_deferred()) {
        return assemble(results, build);
    }

    Outcome::Deferred(Deferred::new(async move {
        let mut resolved = Vec::with_capacity(results.len());
        for (segment, outcome) in results {
            let outcome = match outcome {
                Outcome::Deferred(pending) => pending.into_inner().await,
                other => other,
            };
            resolved.push((segment, outcome));
        }
        assemble(resolved, build)
    }))
}

fn assemble(
    results: Vec<(PathSegment, Outcome<Value>)>,
    build: fn(Vec<(PathSegment, Value)>) -> Value,
) -> Outcome<Value> {
    let mut values = Vec::with_capacity(results.len());
    let mut issues = Vec::new();
    for (segment, outcome) in results {
        match outcome {
            Outcome::Valid(value) => values.push((segment, value)),
            Outcome::Invalid(found) => issues.extend(found.prefixed(segment)),
            Outcome::Deferred(_) => {
                issues.push(Issue::new("Unresolved asynchronous result").prefixed(segment));
            }
        }
    }
    Outcome::from_issues(issues, || build(values))
}

fn build_object(values: Vec<(PathSegment, Value)>) -> Value {
    let map: Map<String, Value> = values
        .into_iter()
        .map(|(segment, value)| (segment.to_string(), value))
        .collect();
    Value::Object(map)
}

fn build_array(values: Vec<(PathSegment, Value)>) -> Value {
    Value::Array(values.into_iter().map(|(_, value)| value).collect())
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
