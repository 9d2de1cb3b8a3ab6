// crates/param-gate-core/src/runtime/visibility.rs
// ============================================================================
// Module: Param Gate Visibility Resolver
// Description: Per-node visibility from display conditions and union selection.
// Purpose: Decide which fields are active for the current value tree.
// Dependencies: serde, crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Resolution walks the schema depth-first in document order. For each node:
//!
//! 1. Visibility starts true.
//! 2. A `show` condition, when present, sets the baseline.
//! 3. A `hide` condition that holds turns visibility off. It never turns it on.
//! 4. A node under a non-visible parent is not visible, whatever its own
//!    conditions say.
//! 5. Fields of a union variant other than the selected one are not visible,
//!    and their conditions are not evaluated.
//!
//! Conditions may reference any value path, including fields of an inactive
//! variant; such paths usually resolve to missing.
//!
//! Nodes beneath array items follow their array's visibility; their own
//! conditions still read absolute value paths. A union beneath array items
//! has no selection, so none of its variant fields is visible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::FieldPath;
use crate::core::NodeEntry;
use crate::core::ValueTree;
use crate::runtime::compiled::CompiledSchema;
use crate::runtime::evaluator::evaluate;
use crate::runtime::union::UnionSelection;
use crate::runtime::union::resolve_unions;

// ============================================================================
// SECTION: Visibility Map
// ============================================================================

/// Visibility of every node, keyed by address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<FieldPath, bool>);

impl VisibilityMap {
    /// Returns the visibility of a node; unknown addresses are not visible.
    #[must_use]
    pub fn is_visible(&self, address: &FieldPath) -> bool {
        self.0.get(address).copied().unwrap_or(false)
    }

    /// Returns the recorded visibility of a node.
    #[must_use]
    pub fn get(&self, address: &FieldPath) -> Option<bool> {
        self.0.get(address).copied()
    }

    /// Returns the number of recorded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no node is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over every node and its visibility.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, bool)> {
        self.0.iter().map(|(address, visible)| (address, *visible))
    }

    /// Returns the addresses of visible nodes.
    #[must_use]
    pub fn visible(&self) -> Vec<&FieldPath> {
        self.0.iter().filter(|(_, visible)| **visible).map(|(address, _)| address).collect()
    }
}

/// Visibility and union selection computed from one value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Per-node visibility.
    pub visibility: VisibilityMap,
    /// Per-union selected variant.
    pub unions: UnionSelection,
}

impl Resolution {
    /// Returns unions that are visible but have no selected variant.
    #[must_use]
    pub fn incomplete_unions(&self) -> Vec<&FieldPath> {
        self.unions
            .incomplete()
            .into_iter()
            .filter(|address| self.visibility.is_visible(address))
            .collect()
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves union selection and visibility for a value tree.
#[must_use]
pub fn resolve(schema: &CompiledSchema, values: &ValueTree) -> Resolution {
    let unions = resolve_unions(schema, values);
    let visibility = visibility_with(schema, values, &unions);
    Resolution {
        visibility,
        unions,
    }
}

/// Resolves visibility alone.
#[must_use]
pub fn resolve_visibility(schema: &CompiledSchema, values: &ValueTree) -> VisibilityMap {
    resolve(schema, values).visibility
}

/// Computes visibility given an already resolved union selection.
fn visibility_with(
    schema: &CompiledSchema,
    values: &ValueTree,
    unions: &UnionSelection,
) -> VisibilityMap {
    let mut map = BTreeMap::new();
    for entry in schema.walk() {
        let visible = eligible(&entry, &map, unions) && own_visibility(schema, &entry, values);
        map.insert(entry.address, visible);
    }
    VisibilityMap(map)
}

/// Returns true when the parent is visible and, for variant fields, the
/// variant is the selected one.
fn eligible(
    entry: &NodeEntry<'_>,
    resolved: &BTreeMap<FieldPath, bool>,
    unions: &UnionSelection,
) -> bool {
    let Some(parent) = entry.address.parent() else {
        return true;
    };
    if !resolved.get(&parent).copied().unwrap_or(false) {
        return false;
    }
    // Untracked unions (beneath array items) have no selection.
    entry.variant.is_none_or(|variant| unions.selected(&parent) == Some(variant))
}

/// Applies `show` then `hide` for one eligible node.
fn own_visibility(schema: &CompiledSchema, entry: &NodeEntry<'_>, values: &ValueTree) -> bool {
    let Some(display) = schema.display(&entry.address) else {
        return true;
    };
    let shown = display.show.as_ref().is_none_or(|show| evaluate(show, values));
    shown && !display.hide.as_ref().is_some_and(|hide| evaluate(hide, values))
}
