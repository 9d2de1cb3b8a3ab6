// crates/param-logic/src/lib.rs
// ============================================================================
// Module: Param Logic Root
// Description: Public API surface for the expression subsystem.
// Purpose: Wire together core modules and re-exports.
// Dependencies: crate::{error, expression, trace, traits, validator}
// ============================================================================

//! ## Overview
//! Param Logic is a small, domain-agnostic boolean algebra: `$and`, `$or`,
//! and `$nor` over typed predicates. Domains supply leaves through
//! [`PredicateEval`]; the crate supplies evaluation, tracing, and structural
//! limits.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod error;
pub mod expression;
pub mod trace;
pub mod traits;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ExpressionError;
pub use expression::Expression;
pub use trace::ExpressionTrace;
pub use trace::GroupKind;
pub use trace::NoopTrace;
pub use traits::PredicateEval;
pub use validator::ExpressionLimits;
pub use validator::ExpressionValidator;

// ============================================================================
// SECTION: Convenience DSL
// ============================================================================

/// Convenience functions for creating expressions without builders
pub mod convenience {
    use super::Expression;

    /// Creates an expression requiring all of the given expressions
    #[must_use]
    pub fn all<P>(children: Vec<Expression<P>>) -> Expression<P> {
        Expression::and(children)
    }

    /// Creates an expression requiring any of the given expressions
    #[must_use]
    pub fn any<P>(children: Vec<Expression<P>>) -> Expression<P> {
        Expression::or(children)
    }

    /// Creates an expression requiring none of the given expressions
    #[must_use]
    pub fn none<P>(children: Vec<Expression<P>>) -> Expression<P> {
        Expression::nor(children)
    }

    /// Creates an expression from a predicate
    #[must_use]
    pub const fn predicate<P>(predicate: P) -> Expression<P> {
        Expression::predicate(predicate)
    }
}
