// crates/param-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Param Gate Runtime
// Description: Validation, evaluation, and resolution stages.
// Purpose: Turn authored schemas and live values into visibility decisions.
// Dependencies: crate::{core, interfaces}, param-logic
// ============================================================================

//! ## Overview
//! Runtime stages are pure, synchronous functions over immutable inputs.
//! Schema validation runs once at load time and yields a [`CompiledSchema`];
//! union selection, visibility, submission filtering, and field projection
//! run per value change and allocate their own outputs, so concurrent calls
//! on a shared schema need no locking.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod comparator;
pub mod compiled;
pub mod evaluator;
pub mod fields;
pub mod submission;
pub mod union;
pub mod validator;
pub mod visibility;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use comparator::evaluate_operator;
pub use comparator::values_equal;
pub use compiled::CompiledDisplay;
pub use compiled::CompiledSchema;
pub use evaluator::LeafOutcome;
pub use evaluator::LeafRecorder;
pub use evaluator::evaluate;
pub use evaluator::evaluate_traced;
pub use fields::EffectiveField;
pub use fields::effective_fields;
pub use submission::EffectiveSubmission;
pub use submission::SubmissionOptions;
pub use submission::filter_submission;
pub use union::UnionIndex;
pub use union::UnionSelection;
pub use union::resolve_unions;
pub use union::select_variant;
pub use validator::DefectKind;
pub use validator::SchemaDefect;
pub use validator::SchemaLimits;
pub use validator::SchemaValidator;
pub use validator::ValidationResult;
pub use validator::compile;
pub use validator::validate;
pub use visibility::Resolution;
pub use visibility::VisibilityMap;
pub use visibility::resolve;
pub use visibility::resolve_visibility;
