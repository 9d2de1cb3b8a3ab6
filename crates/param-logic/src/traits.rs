// crates/param-logic/src/traits.rs
// ============================================================================
// Module: Expression Traits
// Description: Evaluation contract for expression leaves.
// Purpose: Define how domain predicates evaluate against a domain reader.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Expression trees are domain-agnostic. Leaves implement [`PredicateEval`]
//! against a reader type chosen by the domain (a value tree, a row view, an
//! in-memory fixture), and the combinators in
//! [`Expression`](crate::expression::Expression) do the rest.

// ============================================================================
// SECTION: Predicate Trait
// ============================================================================

/// Core trait for predicate evaluation over a domain reader
///
/// Implementations must be total: a predicate that cannot be decided against
/// the reader (missing data, mismatched types) evaluates to `false` rather
/// than failing. Structural problems belong to load-time validation.
pub trait PredicateEval {
    /// Domain-specific reader the predicate inspects
    type Reader<'a>;

    /// Evaluates the predicate against the reader
    fn eval(&self, reader: &Self::Reader<'_>) -> bool;
}

