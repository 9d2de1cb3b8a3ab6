// crates/param-gate-core/src/runtime/fields.rs
// ============================================================================
// Module: Param Gate Effective Fields
// Description: Projection of visible nodes for a host renderer.
// Purpose: Hand renderers the active fields with resolved presentation text.
// Dependencies: serde, serde_json, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The renderer never sees conditions. It receives the visible fields in
//! document order with their kind, required flag, current value, and
//! presentation text resolved by an injected [`TextResolver`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::FieldPath;
use crate::core::I18nText;
use crate::core::ValueTree;
use crate::interfaces::TextResolver;
use crate::runtime::compiled::CompiledSchema;
use crate::runtime::visibility::resolve;

// ============================================================================
// SECTION: Effective Field
// ============================================================================

/// One visible field as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveField {
    /// Node address.
    pub address: FieldPath,
    /// Dotted value path, absent beneath array items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_path: Option<String>,
    /// Wire label of the node kind.
    pub kind: &'static str,
    /// Whether the host must collect a value.
    pub required: bool,
    /// Current value, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Resolved label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resolved help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Resolved placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Returns the visible fields of a schema, root excluded, in document order.
#[must_use]
pub fn effective_fields(
    schema: &CompiledSchema,
    values: &ValueTree,
    resolver: &dyn TextResolver,
) -> Vec<EffectiveField> {
    let resolution = resolve(schema, values);
    let text = |source: Option<&I18nText>| {
        source.and_then(|source| resolver.resolve(source)).map(str::to_string)
    };
    schema
        .walk()
        .filter(|entry| {
            !entry.address.is_root() && resolution.visibility.is_visible(&entry.address)
        })
        .map(|entry| {
            let value_segments = entry.address.value_segments();
            let value =
                value_segments.as_ref().and_then(|segments| values.lookup(segments)).cloned();
            EffectiveField {
                value_path: value_segments.map(|segments| segments.join(".")),
                kind: entry.node.kind.label(),
                required: entry.node.required,
                value,
                default: entry.node.default.clone(),
                label: text(entry.node.label.as_ref()),
                help: text(entry.node.help.as_ref()),
                placeholder: text(entry.node.placeholder.as_ref()),
                address: entry.address,
            }
        })
        .collect()
}
