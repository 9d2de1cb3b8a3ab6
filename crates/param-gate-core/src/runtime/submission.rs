// crates/param-gate-core/src/runtime/submission.rs
// ============================================================================
// Module: Param Gate Submission Filter
// Description: Prunes a final value tree down to its visible fields.
// Purpose: Keep stale hidden or inactive-variant values out of execution.
// Dependencies: serde, serde_json, crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Before a value tree becomes the input of an invocation, the submission
//! filter re-runs union and visibility resolution on it and keeps only the
//! values of visible fields. Values of hidden fields, of non-selected union
//! variants, and of keys the schema does not declare are dropped and
//! reported. Array values are kept or dropped whole.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::FieldPath;
use crate::core::NodeKind;
use crate::core::ValueTree;
use crate::runtime::compiled::CompiledSchema;
use crate::runtime::visibility::resolve;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Submission filter options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionOptions {
    /// Fill absent values of visible leaf fields from their defaults.
    pub apply_defaults: bool,
}

// ============================================================================
// SECTION: Effective Submission
// ============================================================================

/// Value tree accepted for execution and what was removed from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSubmission {
    /// Pruned values.
    pub values: Value,
    /// Dotted paths of input values that were dropped, sorted.
    pub dropped: Vec<String>,
    /// Dotted paths filled from defaults, in document order.
    pub defaulted: Vec<String>,
    /// Dotted paths of kept secret values, in document order.
    pub secret_paths: Vec<String>,
    /// Visible unions with no selected variant.
    pub incomplete_unions: Vec<FieldPath>,
}

impl EffectiveSubmission {
    /// Returns the pruned values as a value tree.
    #[must_use]
    pub fn value_tree(&self) -> ValueTree {
        ValueTree::new(self.values.clone())
    }
}

// ============================================================================
// SECTION: Filtering
// ============================================================================

/// Filters a final value tree against a compiled schema.
#[must_use]
pub fn filter_submission(
    schema: &CompiledSchema,
    values: &ValueTree,
    options: SubmissionOptions,
) -> EffectiveSubmission {
    let resolution = resolve(schema, values);
    let mut output = Map::new();
    let mut defaulted = Vec::new();
    let mut secret_paths = Vec::new();

    for entry in schema.walk() {
        if entry.address.is_root() || !resolution.visibility.is_visible(&entry.address) {
            continue;
        }
        let Some(segments) = entry.address.value_segments() else {
            continue;
        };
        let current = values.lookup(&segments);
        match &entry.node.kind {
            NodeKind::Object {
                ..
            }
            | NodeKind::DiscriminatedUnion {
                ..
            } => {
                if matches!(current, Some(Value::Object(_))) {
                    ensure_object(&mut output, &segments);
                }
            }
            kind => {
                if let Some(value) = current {
                    insert_at(&mut output, &segments, value.clone());
                } else if options.apply_defaults
                    && let Some(default) = &entry.node.default
                {
                    insert_at(&mut output, &segments, default.clone());
                    defaulted.push(segments.join("."));
                } else {
                    continue;
                }
                if kind.is_secret() {
                    secret_paths.push(segments.join("."));
                }
            }
        }
    }

    let output = Value::Object(output);
    let kept = ValueTree::new(output.clone());
    let mut dropped = Vec::new();
    collect_leaf_paths(values.as_value(), &mut Vec::new(), &mut |path| {
        if kept.lookup(path).is_none() {
            dropped.push(path.join("."));
        }
    });
    dropped.sort();

    EffectiveSubmission {
        values: output,
        dropped,
        defaulted,
        secret_paths,
        incomplete_unions: resolution.incomplete_unions().into_iter().cloned().collect(),
    }
}

// ============================================================================
// SECTION: Tree Helpers
// ============================================================================

/// Ensures an object exists at `segments`, creating parents as needed.
fn ensure_object<'a>(
    map: &'a mut Map<String, Value>,
    segments: &[String],
) -> Option<&'a mut Map<String, Value>> {
    let mut current = map;
    for segment in segments {
        let slot = current.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        current = slot.as_object_mut()?;
    }
    Some(current)
}

/// Inserts a value at `segments`; conflicting shapes leave the tree unchanged.
fn insert_at(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    if let Some(parent) = ensure_object(map, parents) {
        parent.insert(last.clone(), value);
    }
}

/// Visits every leaf path of a value: non-object values and empty objects.
fn collect_leaf_paths<F>(value: &Value, prefix: &mut Vec<String>, visit: &mut F)
where
    F: FnMut(&[String]),
{
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                prefix.push(key.clone());
                collect_leaf_paths(child, prefix, visit);
                prefix.pop();
            }
        }
        _ => {
            if !prefix.is_empty() {
                visit(prefix);
            }
        }
    }
}
