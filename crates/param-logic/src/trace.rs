// crates/param-logic/src/trace.rs
// ============================================================================
// Module: Expression Tracing
// Description: Observation hooks for expression evaluation.
// Purpose: Let callers explain an evaluation without changing its result.
// Dependencies: serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! Traces observe predicate and combinator results as an expression is
//! evaluated. They never influence the outcome. Evaluation short-circuits the
//! same way with or without a trace, so a trace reports exactly the leaves
//! that were consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Group Kind
// ============================================================================

/// Logical combinator classification
///
/// # Invariants
/// - Labels are stable and match the query surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Every child must hold
    And,
    /// At least one child must hold
    Or,
    /// No child may hold
    Nor,
}

impl GroupKind {
    /// Returns the surface-syntax operator for the combinator
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
            Self::Nor => "$nor",
        }
    }

    /// Returns the result of the combinator over zero children
    #[must_use]
    pub const fn empty_result(self) -> bool {
        match self {
            Self::And | Self::Nor => true,
            Self::Or => false,
        }
    }

    /// Returns the child result that settles the combinator early
    ///
    /// Once a child yields this value the group result is the negation of
    /// [`GroupKind::empty_result`] and remaining children are skipped.
    #[must_use]
    pub const fn decisive_child(self) -> bool {
        match self {
            Self::And => false,
            Self::Or | Self::Nor => true,
        }
    }
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Trace hook for expression evaluation
pub trait ExpressionTrace<P> {
    /// Called whenever a predicate is evaluated
    fn on_predicate(&mut self, predicate: &P, result: bool);

    /// Called when a combinator finishes, with the number of children consulted
    fn on_group(&mut self, _kind: GroupKind, _consulted: usize, _result: bool) {}
}

/// No-op trace hook for fast paths
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default)]
pub struct NoopTrace;

impl<P> ExpressionTrace<P> for NoopTrace {
    fn on_predicate(&mut self, _predicate: &P, _result: bool) {}
}
