// crates/param-gate-core/src/runtime/compiled.rs
// ============================================================================
// Module: Param Gate Compiled Schema
// Description: Validated schema with pre-parsed conditions and union indexes.
// Purpose: Share one immutable artifact across concurrent evaluations.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`CompiledSchema`] is only produced by a validation pass that found no
//! defects. It owns the authored tree, the parsed `show` / `hide` expression
//! of every node that has one, and a lookup index per union. It is immutable
//! and `Send + Sync`, so hosts compile once per schema load and share it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::FieldPath;
use crate::core::HashDigest;
use crate::core::HashError;
use crate::core::ParameterNode;
use crate::core::QueryExpression;
use crate::core::hashing::schema_fingerprint;
use crate::core::schema::SchemaWalk;
use crate::runtime::union::UnionIndex;

// ============================================================================
// SECTION: Compiled Display
// ============================================================================

/// Parsed display conditions of one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledDisplay {
    /// Parsed `show` condition.
    pub show: Option<QueryExpression>,
    /// Parsed `hide` condition.
    pub hide: Option<QueryExpression>,
}

impl CompiledDisplay {
    /// Returns true when neither condition is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.show.is_none() && self.hide.is_none()
    }
}

// ============================================================================
// SECTION: Compiled Schema
// ============================================================================

/// Validated, immutable schema ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    /// Authored tree.
    root: ParameterNode,
    /// Parsed conditions keyed by node address.
    conditions: BTreeMap<FieldPath, CompiledDisplay>,
    /// Union lookup data keyed by union address.
    unions: BTreeMap<FieldPath, UnionIndex>,
}

impl CompiledSchema {
    /// Assembles a compiled schema from a validated tree.
    pub(crate) fn new(
        root: ParameterNode,
        conditions: BTreeMap<FieldPath, CompiledDisplay>,
    ) -> Self {
        let unions = root
            .walk()
            .filter_map(|entry| {
                let index = UnionIndex::from_node(entry.node, &entry.address)?;
                Some((entry.address, index))
            })
            .collect();
        Self {
            root,
            conditions,
            unions,
        }
    }

    /// Returns the authored tree.
    #[must_use]
    pub const fn root(&self) -> &ParameterNode {
        &self.root
    }

    /// Walks the tree in document order.
    #[must_use]
    pub fn walk(&self) -> SchemaWalk<'_> {
        self.root.walk()
    }

    /// Returns the parsed conditions of a node.
    #[must_use]
    pub fn display(&self, address: &FieldPath) -> Option<&CompiledDisplay> {
        self.conditions.get(address)
    }

    /// Iterates over every union and its index.
    pub fn unions(&self) -> impl Iterator<Item = (&FieldPath, &UnionIndex)> {
        self.unions.iter()
    }

    /// Fingerprints the authored tree.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the tree cannot be canonicalized.
    pub fn fingerprint(&self) -> Result<HashDigest, HashError> {
        schema_fingerprint(&self.root)
    }
}
