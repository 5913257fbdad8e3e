//! Rule types for record remodeling.
//!
//! A [`Transformation`] is what callers hand to the registry builders. It is
//! resolved once, at registration time, into an optional [`Rule`] stored
//! under the output key. `apply` only ever matches on resolved rules.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::BoxError;

/// A plain key/value record, as read from or written to JSON.
pub type Record = Map<String, Value>;

/// Caller-supplied function computing an output value.
///
/// Receives the entire source record and a hint (normally the output key).
pub type ComputeFn = Arc<dyn Fn(&Record, &str) -> Result<Value, BoxError> + Send + Sync>;

/// A resolved transformation for one output key.
#[derive(Clone)]
pub enum Rule {
    /// Copy `source[source_key]`; absent keys produce `Value::Null`.
    Copy { source_key: String },
    /// Call `func(source, hint)`. Without a hint the output key is passed.
    Compute {
        func: ComputeFn,
        hint: Option<String>,
    },
}

impl Rule {
    /// Rule copying the value stored under `source_key`.
    pub fn copy(source_key: impl Into<String>) -> Self {
        Self::Copy {
            source_key: source_key.into(),
        }
    }

    /// Rule computing its value from the whole source record.
    ///
    /// The function receives the output key being written as its hint.
    pub fn compute<F>(func: F) -> Self
    where
        F: Fn(&Record, &str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Compute {
            func: Arc::new(func),
            hint: None,
        }
    }

    /// Rule that always yields `value`.
    pub fn constant(value: Value) -> Self {
        Self::compute(move |_, _| Ok(value.clone()))
    }

    /// Produce the value for `output_key` from `source`.
    pub(crate) fn evaluate(&self, source: &Record, output_key: &str) -> Result<Value, BoxError> {
        match self {
            Self::Copy { source_key } => Ok(source.get(source_key).cloned().unwrap_or(Value::Null)),
            Self::Compute { func, hint } => func(source, hint.as_deref().unwrap_or(output_key)),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy { source_key } => f
                .debug_struct("Copy")
                .field("source_key", source_key)
                .finish(),
            Self::Compute { hint, .. } => f
                .debug_struct("Compute")
                .field("hint", hint)
                .finish_non_exhaustive(),
        }
    }
}

/// Caller-facing transformation, accepted by the registry builders.
///
/// Mirrors the three shapes a transformation may take: nothing, the name of
/// a source key, or a function.
#[derive(Clone, Default)]
pub enum Transformation {
    /// Register "no rule" for the key.
    #[default]
    Skip,
    /// Copy from the named source key.
    Copy(String),
    /// Compute the value; the function receives the output key as its hint.
    Compute(ComputeFn),
}

impl Transformation {
    pub fn compute<F>(func: F) -> Self
    where
        F: Fn(&Record, &str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Compute(Arc::new(func))
    }

    /// Resolve into the rule stored under `output_key`.
    pub(crate) fn into_rule(self, output_key: &str) -> Option<Rule> {
        match self {
            Self::Skip => None,
            Self::Copy(source_key) => Some(Rule::Copy { source_key }),
            Self::Compute(func) => Some(Rule::Compute {
                func,
                hint: Some(output_key.to_string()),
            }),
        }
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("Skip"),
            Self::Copy(source_key) => f.debug_tuple("Copy").field(source_key).finish(),
            Self::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

// An empty source key means "no rule", same as an absent one.
impl From<&str> for Transformation {
    fn from(source_key: &str) -> Self {
        if source_key.is_empty() {
            Self::Skip
        } else {
            Self::Copy(source_key.to_string())
        }
    }
}

impl From<String> for Transformation {
    fn from(source_key: String) -> Self {
        if source_key.is_empty() {
            Self::Skip
        } else {
            Self::Copy(source_key)
        }
    }
}

impl<T: Into<Transformation>> From<Option<T>> for Transformation {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Skip, Into::into)
    }
}

impl From<Rule> for Transformation {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Copy { source_key } => Self::Copy(source_key),
            Rule::Compute { func, .. } => Self::Compute(func),
        }
    }
}

/// One element of a flat `[key, transformation, key, transformation, ...]` sequence.
#[derive(Debug, Clone)]
pub enum XformItem {
    Key(String),
    Xform(Transformation),
}

impl XformItem {
    pub fn key(output_key: impl Into<String>) -> Self {
        Self::Key(output_key.into())
    }

    pub fn xform(transformation: impl Into<Transformation>) -> Self {
        Self::Xform(transformation.into())
    }
}

/// One key name or a list of key names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyList(Vec<String>);

impl KeyList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for KeyList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<String> for KeyList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&str> for KeyList {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for KeyList {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl<S: Into<String>> From<Vec<S>> for KeyList {
    fn from(keys: Vec<S>) -> Self {
        Self(keys.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for KeyList {
    fn from(keys: [S; N]) -> Self {
        Self(keys.into_iter().map(Into::into).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for KeyList {
    fn from(keys: &[S]) -> Self {
        Self(keys.iter().map(|k| k.as_ref().to_string()).collect())
    }
}
