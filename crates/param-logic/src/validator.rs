// crates/param-logic/src/validator.rs
// ============================================================================
// Module: Expression Validation
// Description: Structural limit checks for expression trees.
// Purpose: Reject oversized or disallowed trees before they are evaluated.
// Dependencies: crate::{error, expression}
// ============================================================================

//! ## Overview
//! Expression trees are authored by third parties and are untrusted. The
//! validator bounds depth and predicate count and can optionally reject
//! empty combinators. Domain predicates are validated by the domain when the
//! tree is parsed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::ExpressionError;
use crate::expression::Expression;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum expression depth.
pub const DEFAULT_MAX_DEPTH: usize = 16;
/// Default maximum predicate count per expression.
pub const DEFAULT_MAX_PREDICATES: usize = 256;

/// Structural limits for expression trees
///
/// # Invariants
/// - No invariants are enforced; callers should choose safe bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionLimits {
    /// Maximum allowed tree depth
    pub max_depth: usize,
    /// Maximum allowed predicate leaves
    pub max_predicates: usize,
    /// Whether empty combinators are accepted
    pub allow_empty_groups: bool,
}

impl Default for ExpressionLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_predicates: DEFAULT_MAX_PREDICATES,
            allow_empty_groups: true,
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validator for expression trees
///
/// # Invariants
/// - Uses the stored [`ExpressionLimits`] for all decisions.
#[derive(Debug, Clone, Default)]
pub struct ExpressionValidator {
    /// Structural limits applied by this validator.
    limits: ExpressionLimits,
}

impl ExpressionValidator {
    /// Creates a validator with the given limits
    #[must_use]
    pub const fn new(limits: ExpressionLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Returns the configured limits
    #[must_use]
    pub const fn limits(&self) -> ExpressionLimits {
        self.limits
    }

    /// Validates an expression tree
    ///
    /// # Errors
    /// Returns [`ExpressionError`] when the tree violates a structural limit.
    pub fn validate<P>(&self, expression: &Expression<P>) -> Result<(), ExpressionError> {
        let depth = expression.depth();
        if depth > self.limits.max_depth {
            return Err(ExpressionError::TooDeep {
                max_depth: self.limits.max_depth,
                actual_depth: depth,
            });
        }
        let predicates = expression.predicate_count();
        if predicates > self.limits.max_predicates {
            return Err(ExpressionError::TooManyPredicates {
                max_predicates: self.limits.max_predicates,
                actual_predicates: predicates,
            });
        }
        if !self.limits.allow_empty_groups {
            Self::reject_empty_groups(expression)?;
        }
        Ok(())
    }

    /// Walks the tree and rejects the first empty combinator.
    fn reject_empty_groups<P>(expression: &Expression<P>) -> Result<(), ExpressionError> {
        if let Some((kind, children)) = expression.as_group() {
            if children.is_empty() {
                return Err(ExpressionError::EmptyGroup(kind));
            }
            for child in children {
                Self::reject_empty_groups(child)?;
            }
        }
        Ok(())
    }
}
