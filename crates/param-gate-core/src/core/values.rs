// crates/param-gate-core/src/core/values.rs
// ============================================================================
// Module: Param Gate Value Tree
// Description: Read-only view over user-entered parameter values.
// Purpose: Resolve dotted paths while distinguishing missing from null.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ValueTree`] wraps the JSON object a host collects from user input. The
//! core never mutates it. Lookups return `None` for a missing path and
//! `Some(Value::Null)` for an explicit null, so `$exists` tests presence and
//! never truthiness.
//!
//! Path resolution walks nested objects only. Array values are opaque: a path
//! that would step into an array resolves to missing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::is_valid_identifier;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building a value tree from flat entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTreeError {
    /// A dotted key is empty or has an invalid segment.
    #[error("invalid value path: {0}")]
    InvalidPath(String),
    /// A key would descend through a non-object value.
    #[error("value path conflicts with an existing value: {0}")]
    PathConflict(String),
}

// ============================================================================
// SECTION: Value Tree
// ============================================================================

/// Runtime parameter values shaped like the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTree(Value);

impl Default for ValueTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for ValueTree {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl ValueTree {
    /// Wraps a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns an empty object tree.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Builds a tree from `dotted.path -> value` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ValueTreeError`] when a key is malformed or two keys
    /// disagree about the shape (e.g. `a` and `a.b` both set).
    pub fn from_flat<'a, I>(entries: I) -> Result<Self, ValueTreeError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut root = Map::new();
        for (key, value) in entries {
            let segments: Vec<&str> = key.split('.').collect();
            if segments.iter().any(|segment| !is_valid_identifier(segment)) {
                return Err(ValueTreeError::InvalidPath(key.to_string()));
            }
            insert_flat(&mut root, &segments, value, key)?;
        }
        Ok(Self(Value::Object(root)))
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the tree and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Resolves a dotted path (`output.format`).
    ///
    /// The empty path resolves to the whole tree.
    #[must_use]
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        if dotted.is_empty() {
            return Some(&self.0);
        }
        let segments: Vec<&str> = dotted.split('.').collect();
        self.lookup(&segments)
    }

    /// Resolves a pre-split path.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let mut current = &self.0;
        for segment in segments {
            match current {
                Value::Object(map) => current = map.get(segment.as_ref())?,
                _ => return None,
            }
        }
        Some(current)
    }
}

/// Inserts one flat entry beneath `map`.
fn insert_flat(
    map: &mut Map<String, Value>,
    segments: &[&str],
    value: Value,
    key: &str,
) -> Result<(), ValueTreeError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(ValueTreeError::InvalidPath(key.to_string()));
    };
    if rest.is_empty() {
        if map.contains_key(*first) {
            return Err(ValueTreeError::PathConflict(key.to_string()));
        }
        map.insert((*first).to_string(), value);
        return Ok(());
    }
    let slot = map.entry((*first).to_string()).or_insert_with(|| Value::Object(Map::new()));
    match slot {
        Value::Object(child) => insert_flat(child, rest, value, key),
        _ => Err(ValueTreeError::PathConflict(key.to_string())),
    }
}
