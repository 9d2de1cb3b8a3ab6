// crates/param-logic/src/expression.rs
// ============================================================================
// Module: Expression Core Types
// Description: Boolean algebra over typed predicates.
// Purpose: Define `Expression` with `$and`/`$or`/`$nor` combinators and
//          short-circuit evaluation.
// Dependencies: serde::{Deserialize, Serialize}, smallvec::SmallVec
// ============================================================================

//! ## Overview
//! This module defines the expression tree used for display conditions. The
//! combinators are universal; the [`Expression::Predicate`] variant is the
//! boundary where domain semantics are injected through
//! [`PredicateEval`](crate::traits::PredicateEval).
//!
//! Identities for empty combinators follow the query surface syntax:
//! `$and: []` holds, `$or: []` does not, `$nor: []` holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::trace::ExpressionTrace;
use crate::trace::GroupKind;
use crate::trace::NoopTrace;
use crate::traits::PredicateEval;

// ============================================================================
// SECTION: Expression Definition
// ============================================================================

/// Boolean expression tree with domain-specific leaves
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub enum Expression<P> {
    /// Logical AND: all children must hold
    ///
    /// Short-circuits on the first failure. Empty And holds.
    And(SmallVec<[Box<Self>; 4]>),

    /// Logical OR: at least one child must hold
    ///
    /// Short-circuits on the first success. Empty Or never holds.
    Or(SmallVec<[Box<Self>; 4]>),

    /// Logical NOR: no child may hold
    ///
    /// Short-circuits on the first success. Empty Nor holds.
    Nor(SmallVec<[Box<Self>; 4]>),

    /// Domain-specific atomic predicate
    Predicate(P),
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl<P> Expression<P> {
    /// Creates an AND over the given children
    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        Self::And(children.into_iter().map(Box::new).collect())
    }

    /// Creates an OR over the given children
    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        Self::Or(children.into_iter().map(Box::new).collect())
    }

    /// Creates a NOR over the given children
    #[must_use]
    pub fn nor(children: Vec<Self>) -> Self {
        Self::Nor(children.into_iter().map(Box::new).collect())
    }

    /// Creates a group of the given kind
    #[must_use]
    pub fn group(kind: GroupKind, children: Vec<Self>) -> Self {
        match kind {
            GroupKind::And => Self::and(children),
            GroupKind::Or => Self::or(children),
            GroupKind::Nor => Self::nor(children),
        }
    }

    /// Creates a leaf from a predicate
    #[must_use]
    pub const fn predicate(predicate: P) -> Self {
        Self::Predicate(predicate)
    }

    /// Returns the combinator kind and children, or `None` for a leaf
    #[must_use]
    pub fn as_group(&self) -> Option<(GroupKind, &[Box<Self>])> {
        match self {
            Self::And(children) => Some((GroupKind::And, children.as_slice())),
            Self::Or(children) => Some((GroupKind::Or, children.as_slice())),
            Self::Nor(children) => Some((GroupKind::Nor, children.as_slice())),
            Self::Predicate(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<P: PredicateEval> Expression<P> {
    /// Evaluates the expression against a reader
    pub fn eval(&self, reader: &P::Reader<'_>) -> bool {
        self.eval_traced(reader, &mut NoopTrace)
    }

    /// Evaluates the expression while reporting results to a trace
    ///
    /// The result is identical to [`Expression::eval`].
    pub fn eval_traced<T>(&self, reader: &P::Reader<'_>, trace: &mut T) -> bool
    where
        T: ExpressionTrace<P>,
    {
        let (kind, children) = match self {
            Self::Predicate(predicate) => {
                let result = predicate.eval(reader);
                trace.on_predicate(predicate, result);
                return result;
            }
            Self::And(children) => (GroupKind::And, children),
            Self::Or(children) => (GroupKind::Or, children),
            Self::Nor(children) => (GroupKind::Nor, children),
        };
        let mut consulted = 0usize;
        for child in children {
            consulted += 1;
            if child.eval_traced(reader, trace) == kind.decisive_child() {
                let result = !kind.empty_result();
                trace.on_group(kind, consulted, result);
                return result;
            }
        }
        let result = kind.empty_result();
        trace.on_group(kind, consulted, result);
        result
    }
}

// ============================================================================
// SECTION: Structural Queries
// ============================================================================

impl<P> Expression<P> {
    /// Returns the depth of the tree (a lone predicate or empty group is 1)
    #[must_use]
    pub fn depth(&self) -> usize {
        match self.as_group() {
            None => 1,
            Some((_, children)) => {
                1 + children.iter().map(|child| child.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Returns the number of predicate leaves
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        match self.as_group() {
            None => 1,
            Some((_, children)) => children.iter().map(|child| child.predicate_count()).sum(),
        }
    }

    /// Visits every predicate leaf in document order
    pub fn for_each_predicate<F>(&self, visit: &mut F)
    where
        F: FnMut(&P),
    {
        match self {
            Self::Predicate(predicate) => visit(predicate),
            Self::And(children) | Self::Or(children) | Self::Nor(children) => {
                for child in children {
                    child.for_each_predicate(visit);
                }
            }
        }
    }

    /// Collects references to every predicate leaf in document order
    #[must_use]
    pub fn predicates(&self) -> Vec<&P> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    /// Pushes predicate references onto `out`.
    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a P>) {
        match self {
            Self::Predicate(predicate) => out.push(predicate),
            Self::And(children) | Self::Or(children) | Self::Nor(children) => {
                for child in children {
                    child.collect_predicates(out);
                }
            }
        }
    }
}
