// crates/param-gate-core/src/core/mod.rs
// ============================================================================
// Module: Param Gate Core Types
// Description: Schema model, value tree, and query language types.
// Purpose: Provide stable, serializable types shared by every runtime stage.
// Dependencies: param-logic, serde
// ============================================================================

//! ## Overview
//! Core types are plain data: authored schemas, user values, and parsed
//! display conditions. Runtime stages in [`crate::runtime`] consume them
//! without mutation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod hashing;
pub mod identifiers;
pub mod numeric;
pub mod query;
pub mod schema;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::schema_fingerprint;
pub use identifiers::FieldName;
pub use identifiers::FieldPath;
pub use identifiers::PathSegment;
pub use query::ConditionPath;
pub use query::FieldCondition;
pub use query::FieldOperator;
pub use query::QueryError;
pub use query::QueryExpression;
pub use query::QueryLimits;
pub use query::QueryParser;
pub use query::parse_query;
pub use query::render_query;
pub use schema::DisplayRules;
pub use schema::I18nText;
pub use schema::NodeEntry;
pub use schema::NodeKind;
pub use schema::ParameterNode;
pub use schema::StringConstraints;
pub use schema::UnionVariant;
pub use values::ValueTree;
pub use values::ValueTreeError;
