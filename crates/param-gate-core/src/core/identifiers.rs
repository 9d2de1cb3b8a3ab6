// crates/param-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Param Gate Identifiers
// Description: Field names and node addresses for parameter schemas.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FieldName`] names one parameter among its siblings. A [`FieldPath`] is
//! the address of a node in the schema tree: field names, array items
//! (`[]`), and union variants (`@<index>`). Addresses are unique per node even
//! when two union variants declare fields of the same name, while the value
//! path (variants removed) is the location in the value tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Returns true when `value` matches the identifier pattern `[A-Za-z0-9_]+`.
#[must_use]
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Name of a parameter, unique among its siblings.
///
/// # Invariants
/// - Opaque UTF-8 string; the identifier pattern is enforced by schema
///   validation, not by construction, so invalid names can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a new field name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the name matches the identifier pattern.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_identifier(&self.0)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Node Addresses
// ============================================================================

/// One step in a node address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Named child of an object or union variant.
    Field(String),
    /// Element schema of an array.
    Items,
    /// Variant of a discriminated union, by declaration index.
    Variant(usize),
}

/// Address of a node in the schema tree.
///
/// # Invariants
/// - The empty address is the schema root.
/// - A `Variant` segment is always followed by a `Field` segment in
///   addresses produced by schema traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Returns the root address.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns true for the root address.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the segments of this address.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the address of a named child.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        self.with(PathSegment::Field(name.to_string()))
    }

    /// Returns the address of this array's element schema.
    #[must_use]
    pub fn items(&self) -> Self {
        self.with(PathSegment::Items)
    }

    /// Returns the address of a union variant.
    #[must_use]
    pub fn variant(&self, index: usize) -> Self {
        self.with(PathSegment::Variant(index))
    }

    /// Returns the address of the owning node, skipping variant segments.
    ///
    /// The parent of `output@1.schema` is `output`; the root has no parent.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let mut segments = self.0.clone();
        segments.pop()?;
        if matches!(segments.last(), Some(PathSegment::Variant(_))) {
            segments.pop();
        }
        Some(Self(segments))
    }

    /// Returns the value-tree segments for this address.
    ///
    /// Variant segments are dropped. Returns `None` beneath array items,
    /// which the value resolver cannot address.
    #[must_use]
    pub fn value_segments(&self) -> Option<Vec<String>> {
        let mut out = Vec::with_capacity(self.0.len());
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => out.push(name.clone()),
                PathSegment::Variant(_) => {}
                PathSegment::Items => return None,
            }
        }
        Some(out)
    }

    /// Returns the dotted value path for this address (see [`Self::value_segments`]).
    #[must_use]
    pub fn value_path(&self) -> Option<String> {
        self.value_segments().map(|segments| segments.join("."))
    }

    /// Parses the rendered form of an address (`output@1.schema`, `tags[]`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        if text.is_empty() {
            return Some(Self(segments));
        }
        for (index, token) in text.split('.').enumerate() {
            let name_end = token.find(['[', '@']).unwrap_or(token.len());
            let (name, mut rest) = token.split_at(name_end);
            if name.is_empty() {
                if index > 0 {
                    return None;
                }
            } else if is_valid_identifier(name) {
                segments.push(PathSegment::Field(name.to_string()));
            } else {
                return None;
            }
            while !rest.is_empty() {
                if let Some(after) = rest.strip_prefix("[]") {
                    segments.push(PathSegment::Items);
                    rest = after;
                } else if let Some(after) = rest.strip_prefix('@') {
                    let digits = after.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(after.len());
                    let variant = after[.. digits].parse().ok()?;
                    segments.push(PathSegment::Variant(variant));
                    rest = &after[digits ..];
                } else {
                    return None;
                }
            }
        }
        Some(Self(segments))
    }

    /// Returns a new address with one more segment.
    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if index > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Items => f.write_str("[]")?,
                PathSegment::Variant(variant) => write!(f, "@{variant}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
