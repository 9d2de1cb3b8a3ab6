// crates/param-gate-core/src/lib.rs
// ============================================================================
// Module: Param Gate Core Library
// Description: Public API surface for the Param Gate core.
// Purpose: Expose schema types, host interfaces, and runtime stages.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Param Gate core validates declarative parameter schemas and decides, field
//! by field, which parameters are active for a live value tree. Display
//! conditions are MongoDB-style query objects (`$and`, `$gte`, `$regex`, ...)
//! parsed once at load time; discriminated unions expose only the variant
//! their discriminator selects.
//!
//! The core performs no I/O and holds no global state. Locale handling is
//! injected through [`interfaces::TextResolver`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::LocaleResolver;
pub use interfaces::TextResolver;
pub use runtime::CompiledSchema;
pub use runtime::DefectKind;
pub use runtime::EffectiveField;
pub use runtime::EffectiveSubmission;
pub use runtime::LeafOutcome;
pub use runtime::Resolution;
pub use runtime::SchemaDefect;
pub use runtime::SchemaLimits;
pub use runtime::SchemaValidator;
pub use runtime::SubmissionOptions;
pub use runtime::UnionSelection;
pub use runtime::ValidationResult;
pub use runtime::VisibilityMap;
pub use runtime::compile;
pub use runtime::effective_fields;
pub use runtime::evaluate;
pub use runtime::evaluate_traced;
pub use runtime::filter_submission;
pub use runtime::resolve;
pub use runtime::resolve_unions;
pub use runtime::resolve_visibility;
pub use runtime::select_variant;
pub use runtime::validate;
