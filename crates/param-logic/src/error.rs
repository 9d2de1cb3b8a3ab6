// crates/param-logic/src/error.rs
// ============================================================================
// Module: Expression Error Definitions
// Description: Structured diagnostics for expression structure limits.
// Purpose: Report structural violations found before evaluation.
// Dependencies: serde::{Serialize, Deserialize}, std::fmt
// ============================================================================

//! ## Overview
//! Evaluation itself never fails; these errors describe expression trees that
//! must be rejected when they are loaded.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::trace::GroupKind;

/// Structural errors detected while validating an expression tree
///
/// # Invariants
/// - None. Variants capture structured validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionError {
    /// Expression tree nests deeper than allowed
    TooDeep {
        /// Maximum allowed depth
        max_depth: usize,
        /// Depth of the rejected tree
        actual_depth: usize,
    },

    /// Expression tree carries more predicates than allowed
    TooManyPredicates {
        /// Maximum allowed predicate count
        max_predicates: usize,
        /// Predicate count of the rejected tree
        actual_predicates: usize,
    },

    /// An empty combinator was found while empty combinators are disallowed
    EmptyGroup(GroupKind),
}

// ============================================================================
// SECTION: Display Implementation
// ============================================================================

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooDeep {
                max_depth,
                actual_depth,
            } => {
                write!(f, "expression too deep: {actual_depth} levels (max {max_depth})")
            }
            Self::TooManyPredicates {
                max_predicates,
                actual_predicates,
            } => {
                write!(
                    f,
                    "expression has too many conditions: {actual_predicates} (max \
                     {max_predicates})"
                )
            }
            Self::EmptyGroup(kind) => {
                write!(f, "empty {} is not allowed", kind.operator())
            }
        }
    }
}

impl std::error::Error for ExpressionError {}
