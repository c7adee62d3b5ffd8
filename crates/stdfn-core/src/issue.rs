//! # Validation Issues
//!
//! An [`Issue`] is a single failure reported by a schema: a human-readable
//! message plus an optional path locating the failure inside the input.
//! [`Issues`] is the ordered, non-empty sequence a failed validation
//! carries.
//!
//! ## Invariant
//!
//! `Issues` can never be empty. The only constructors are
//! [`Issues::new`] (which rejects an empty vector) and [`Issues::single`].
//! A validation outcome is therefore a failure exactly when it carries a
//! non-empty issue sequence; there is no "invalid with zero issues" state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of an issue path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable description of the failure.
    pub message: String,
    /// Location of the failure within the input. `None` means the input
    /// as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

impl Issue {
    /// Issue at the root of the input.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Issue at `path`.
    pub fn at<P>(message: impl Into<String>, path: P) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        Self {
            message: message.into(),
            path: Some(path.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns the path segments, empty for a root-level issue.
    pub fn path(&self) -> &[PathSegment] {
        self.path.as_deref().unwrap_or_default()
    }

    /// Prepend `segment` to this issue's path.
    ///
    /// Used by composite schemas to re-root issues reported by a nested
    /// schema under the field or element that was being validated.
    pub fn prefixed(mut self, segment: impl Into<PathSegment>) -> Self {
        let mut path = Vec::with_capacity(self.path().len() + 1);
        path.push(segment.into());
        path.extend(self.path.take().unwrap_or_default());
        self.path = Some(path);
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        if path.is_empty() {
            return f.write_str(&self.message);
        }
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Ordered, non-empty sequence of issues.
///
/// Order is exactly the order in which the schema reported the issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Wrap `issues`, or `None` if the vector is empty.
    pub fn new(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self(issues))
        }
    }

    /// A sequence holding exactly one issue.
    pub fn single(issue: Issue) -> Self {
        Self(vec![issue])
    }

    /// Returns the number of issues (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first reported issue.
    pub fn first(&self) -> &Issue {
        &self.0[0]
    }

    /// Returns a slice of all issues.
    pub fn as_slice(&self) -> &[Issue] {
        &self.0
    }

    /// Iterate over the issues in reported order.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.0.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Issue> {
        self.0
    }

    /// Every issue re-rooted under `segment`.
    pub fn prefixed(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        Self(
            self.0
                .into_iter()
                .map(|issue| issue.prefixed(segment.clone()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Issues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let issues = Vec::<Issue>::deserialize(deserializer)?;
        Issues::new(issues)
            .ok_or_else(|| serde::de::Error::custom("issue sequence must not be empty"))
    }
}

impl AsRef<[Issue]> for Issues {
    fn as_ref(&self) -> &[Issue] {
        &self.0
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Issue> for Issues {
    fn from(issue: Issue) -> Self {
        Self::single(issue)
    }
}
