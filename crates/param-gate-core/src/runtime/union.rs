// crates/param-gate-core/src/runtime/union.rs
// ============================================================================
// Module: Param Gate Union Resolver
// Description: Active-variant selection for discriminated unions.
// Purpose: Map each union to the variant its discriminator value selects.
// Dependencies: serde, serde_json, crate::core
// ============================================================================

//! ## Overview
//! A union reads the value at `<union value path>.<discriminator>` and
//! selects the variant whose pinned constant equals it exactly. There is no
//! coercion: the number `1` never selects a variant pinned to `"1"`. An unset
//! or stale discriminator selects nothing and the union is incomplete.
//!
//! Unions beneath array items have no value path. Their selection is made per
//! element by the host, so they never appear in a [`UnionSelection`] and
//! resolve as if no variant were selected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::core::FieldPath;
use crate::core::NodeKind;
use crate::core::ParameterNode;
use crate::core::ValueTree;
use crate::runtime::compiled::CompiledSchema;

// ============================================================================
// SECTION: Union Index
// ============================================================================

/// Pre-computed lookup data for one union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionIndex {
    /// Value path of the discriminator; `None` beneath array items.
    discriminator_path: Option<Vec<String>>,
    /// Pinned constant per variant, in declaration order.
    constants: Vec<Option<String>>,
}

impl UnionIndex {
    /// Builds the index for a union node at `address`.
    ///
    /// Returns `None` when the node is not a discriminated union.
    #[must_use]
    pub fn from_node(node: &ParameterNode, address: &FieldPath) -> Option<Self> {
        let NodeKind::DiscriminatedUnion {
            discriminator,
            variants,
        } = &node.kind
        else {
            return None;
        };
        let discriminator_path = address.value_segments().map(|mut segments| {
            segments.push(discriminator.as_str().to_string());
            segments
        });
        let constants = variants
            .iter()
            .map(|variant| {
                variant
                    .children
                    .iter()
                    .find(|child| child.name == *discriminator)
                    .and_then(|child| match &child.kind {
                        NodeKind::String(constraints) => {
                            constraints.pinned_constant().map(str::to_string)
                        }
                        _ => None,
                    })
            })
            .collect();
        Some(Self {
            discriminator_path,
            constants,
        })
    }

    /// Returns true when the union has a value path and can be selected.
    #[must_use]
    pub const fn is_addressable(&self) -> bool {
        self.discriminator_path.is_some()
    }

    /// Returns the index of the variant selected by `values`.
    #[must_use]
    pub fn select(&self, values: &ValueTree) -> Option<usize> {
        let path = self.discriminator_path.as_ref()?;
        let Some(Value::String(current)) = values.lookup(path) else {
            return None;
        };
        self.constants.iter().position(|constant| constant.as_deref() == Some(current.as_str()))
    }
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Selected variant per union address.
///
/// # Invariants
/// - At most one variant per union; `None` means no variant matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnionSelection(BTreeMap<FieldPath, Option<usize>>);

impl UnionSelection {
    /// Returns the selection for a union, or `None` when the address is not
    /// a tracked union.
    #[must_use]
    pub fn get(&self, address: &FieldPath) -> Option<Option<usize>> {
        self.0.get(address).copied()
    }

    /// Returns the selected variant of a union, if any.
    #[must_use]
    pub fn selected(&self, address: &FieldPath) -> Option<usize> {
        self.0.get(address).copied().flatten()
    }

    /// Returns true when the union is tracked and no variant matched.
    #[must_use]
    pub fn is_incomplete(&self, address: &FieldPath) -> bool {
        matches!(self.0.get(address), Some(None))
    }

    /// Returns every tracked union with no selected variant.
    #[must_use]
    pub fn incomplete(&self) -> Vec<&FieldPath> {
        self.0.iter().filter(|(_, selected)| selected.is_none()).map(|(path, _)| path).collect()
    }

    /// Iterates over every tracked union.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, Option<usize>)> {
        self.0.iter().map(|(path, selected)| (path, *selected))
    }
}

/// Selects the active variant of one union node.
///
/// Returns `None` when the node is not a union, the discriminator is unset or
/// not a string, or no variant pins the current value.
#[must_use]
pub fn select_variant(
    node: &ParameterNode,
    address: &FieldPath,
    values: &ValueTree,
) -> Option<usize> {
    UnionIndex::from_node(node, address)?.select(values)
}

/// Selects the active variant of every addressable union in a schema.
#[must_use]
pub fn resolve_unions(schema: &CompiledSchema, values: &ValueTree) -> UnionSelection {
    UnionSelection(
        schema
            .unions()
            .filter(|(_, index)| index.is_addressable())
            .map(|(address, index)| (address.clone(), index.select(values)))
            .collect(),
    )
}
