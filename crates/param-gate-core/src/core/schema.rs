// crates/param-gate-core/src/core/schema.rs
// ============================================================================
// Module: Param Gate Schema Model
// Description: Typed parameter definition tree and read-only traversal.
// Purpose: Represent authored parameter schemas as a closed sum type.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A parameter schema is a tree of [`ParameterNode`]s. The node kind is a
//! closed tagged enum ([`NodeKind`]) carrying kind-specific constraints, so
//! every processing site matches exhaustively instead of inspecting loose
//! maps. Display conditions are stored raw here and parsed once by schema
//! validation.
//!
//! Wire form uses an internal `type` tag:
//!
//! ```json
//! { "name": "retries", "type": "integer", "minimum": 0, "default": 3 }
//! ```
//!
//! [`ParameterNode::walk`] enumerates nodes depth-first in document order
//! with their address, a borrowed parent link, and the enclosing union
//! variant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::FieldName;
use crate::core::identifiers::FieldPath;
use crate::core::identifiers::PathSegment;

// ============================================================================
// SECTION: Presentation Text
// ============================================================================

/// Localized text keyed by locale (`en_US`, `zh_Hans`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nText(BTreeMap<String, String>);

impl I18nText {
    /// Builds text from `(locale, text)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(locale, text)| (locale.into(), text.into())).collect())
    }

    /// Returns the text for an exact locale.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Returns the text of the lowest-sorted locale.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    /// Returns true when no locale is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// SECTION: Display Rules
// ============================================================================

/// Raw `show` / `hide` query objects as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRules {
    /// Baseline visibility condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Value>,
    /// Condition that turns visibility off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<Value>,
}

impl DisplayRules {
    /// Returns true when neither condition is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.show.is_none() && self.hide.is_none()
    }
}

// ============================================================================
// SECTION: Node Kinds
// ============================================================================

/// Constraints shared by string-like kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringConstraints {
    /// Allowed values.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Single pinned value.
    #[serde(default, rename = "const", skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl StringConstraints {
    /// Returns the pinned constant: `const`, or an `enum` with one value.
    #[must_use]
    pub fn pinned_constant(&self) -> Option<&str> {
        if let Some(constant) = &self.constant {
            return Some(constant);
        }
        match self.options.as_deref() {
            Some([single]) => Some(single),
            _ => None,
        }
    }
}

/// One variant of a discriminated union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionVariant {
    /// Optional presentation label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nText>,
    /// Variant fields, including the discriminator field.
    #[serde(default)]
    pub children: Vec<ParameterNode>,
}

/// Kind of a parameter node with kind-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Free text.
    String(StringConstraints),
    /// Floating-point number.
    Number {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    /// Signed integer.
    Integer {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
    },
    /// Boolean toggle.
    Boolean,
    /// Nested group of named fields.
    Object {
        /// Ordered child fields.
        #[serde(default)]
        children: Vec<ParameterNode>,
    },
    /// Homogeneous list.
    Array {
        /// Element schema; its name is not part of any path.
        items: Box<ParameterNode>,
        /// Minimum element count.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_items: Option<u64>,
        /// Maximum element count.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_items: Option<u64>,
    },
    /// Mutually exclusive variants selected by a pinned field.
    DiscriminatedUnion {
        /// Name of the field whose value selects a variant.
        discriminator: FieldName,
        /// Variants in declaration order.
        #[serde(default)]
        variants: Vec<UnionVariant>,
    },
    /// Reference to a stored credential.
    CredentialReference {
        /// Credential provider the reference belongs to.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider: Option<String>,
    },
    /// Secret text the host encrypts at rest.
    EncryptedString(StringConstraints),
}

impl NodeKind {
    /// Returns the wire label of the kind.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number {
                ..
            } => "number",
            Self::Integer {
                ..
            } => "integer",
            Self::Boolean => "boolean",
            Self::Object {
                ..
            } => "object",
            Self::Array {
                ..
            } => "array",
            Self::DiscriminatedUnion {
                ..
            } => "discriminated_union",
            Self::CredentialReference {
                ..
            } => "credential_reference",
            Self::EncryptedString(_) => "encrypted_string",
        }
    }

    /// Returns true for kinds whose values the host must treat as secret.
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::EncryptedString(_))
    }
}

// ============================================================================
// SECTION: Parameter Node
// ============================================================================

/// One node of the parameter schema.
///
/// # Invariants
/// - Immutable once constructed; validation never mutates the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterNode {
    /// Field name, unique among siblings.
    #[serde(default = "empty_name")]
    pub name: FieldName,
    /// Kind and kind-specific constraints.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Whether the host must collect a value when visible.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Display conditions.
    #[serde(default, skip_serializing_if = "DisplayRules::is_empty")]
    pub display: DisplayRules,
    /// Presentation label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nText>,
    /// Presentation help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<I18nText>,
    /// Presentation placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<I18nText>,
}

/// Serde default for nodes whose name is not addressable (array items).
fn empty_name() -> FieldName {
    FieldName::new("")
}

/// Serde helper for skipping `required: false`.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Serde skip_serializing_if signature.")]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl ParameterNode {
    /// Creates a node with no display rules or presentation text.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: FieldName::new(name),
            kind,
            required: false,
            default: None,
            display: DisplayRules::default(),
            label: None,
            help: None,
            placeholder: None,
        }
    }

    /// Sets the `show` condition.
    #[must_use]
    pub fn with_show(mut self, show: Value) -> Self {
        self.display.show = Some(show);
        self
    }

    /// Sets the `hide` condition.
    #[must_use]
    pub fn with_hide(mut self, hide: Value) -> Self {
        self.display.hide = Some(hide);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Marks the node required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Walks the tree depth-first in document order, starting at this node.
    #[must_use]
    pub fn walk(&self) -> SchemaWalk<'_> {
        SchemaWalk {
            stack: vec![NodeEntry {
                node: self,
                address: FieldPath::root(),
                parent: None,
                variant: None,
                depth: 0,
            }],
        }
    }
}

// ============================================================================
// SECTION: Traversal
// ============================================================================

/// Node yielded by [`ParameterNode::walk`].
#[derive(Debug, Clone)]
pub struct NodeEntry<'a> {
    /// The node itself.
    pub node: &'a ParameterNode,
    /// Address of the node; the walk root has the empty address.
    pub address: FieldPath,
    /// Owning node (the union for variant fields), borrowed.
    pub parent: Option<&'a ParameterNode>,
    /// Variant index when the node is a direct child of a union variant.
    pub variant: Option<usize>,
    /// Distance from the walk root.
    pub depth: usize,
}

impl NodeEntry<'_> {
    /// Returns true when the node is an array element schema.
    #[must_use]
    pub fn is_array_items(&self) -> bool {
        matches!(self.address.segments().last(), Some(PathSegment::Items))
    }
}

/// Pre-order iterator over a schema tree.
#[derive(Debug)]
pub struct SchemaWalk<'a> {
    /// Pending nodes; children are pushed in reverse to pop in order.
    stack: Vec<NodeEntry<'a>>,
}

impl<'a> Iterator for SchemaWalk<'a> {
    type Item = NodeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        let node = entry.node;
        let depth = entry.depth + 1;
        let mut children = Vec::new();
        match &node.kind {
            NodeKind::Object {
                children: fields,
            } => {
                for child in fields {
                    children.push(NodeEntry {
                        node: child,
                        address: entry.address.child(child.name.as_str()),
                        parent: Some(node),
                        variant: None,
                        depth,
                    });
                }
            }
            NodeKind::Array {
                items, ..
            } => children.push(NodeEntry {
                node: items,
                address: entry.address.items(),
                parent: Some(node),
                variant: None,
                depth,
            }),
            NodeKind::DiscriminatedUnion {
                variants, ..
            } => {
                for (index, variant) in variants.iter().enumerate() {
                    let base = entry.address.variant(index);
                    for child in &variant.children {
                        children.push(NodeEntry {
                            node: child,
                            address: base.child(child.name.as_str()),
                            parent: Some(node),
                            variant: Some(index),
                            depth,
                        });
                    }
                }
            }
            NodeKind::String(_)
            | NodeKind::Number {
                ..
            }
            | NodeKind::Integer {
                ..
            }
            | NodeKind::Boolean
            | NodeKind::CredentialReference {
                ..
            }
            | NodeKind::EncryptedString(_) => {}
        }
        self.stack.extend(children.into_iter().rev());
        Some(entry)
    }
}
