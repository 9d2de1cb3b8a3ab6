// crates/param-gate-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Param Gate Condition Evaluator
// Description: Evaluates parsed query expressions against value trees.
// Purpose: Bind field conditions to the generic expression engine.
// Dependencies: param-logic, serde, crate::core
// ============================================================================

//! ## Overview
//! [`FieldCondition`] implements [`PredicateEval`] over a [`ValueTree`], so
//! the `$and` / `$or` / `$nor` combinators come from `param-logic` unchanged.
//! A leaf holds when every one of its operators holds for the value at its
//! path. Evaluation never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use param_logic::ExpressionTrace;
use param_logic::PredicateEval;
use serde::Serialize;

use crate::core::FieldCondition;
use crate::core::QueryExpression;
use crate::core::ValueTree;
use crate::runtime::comparator::evaluate_operator;

// ============================================================================
// SECTION: Predicate Binding
// ============================================================================

impl PredicateEval for FieldCondition {
    type Reader<'a> = ValueTree;

    fn eval(&self, reader: &Self::Reader<'_>) -> bool {
        let value = reader.lookup(self.path.segments());
        self.operators.iter().all(|operator| evaluate_operator(operator, value))
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a query expression against a value tree.
#[must_use]
pub fn evaluate(expression: &QueryExpression, values: &ValueTree) -> bool {
    expression.eval(values)
}

/// Evaluates a query expression and records every consulted leaf.
#[must_use]
pub fn evaluate_traced(
    expression: &QueryExpression,
    values: &ValueTree,
) -> (bool, Vec<LeafOutcome>) {
    let mut recorder = LeafRecorder::default();
    let result = expression.eval_traced(values, &mut recorder);
    (result, recorder.into_outcomes())
}

// ============================================================================
// SECTION: Tracing
// ============================================================================

/// Result of one consulted leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafOutcome {
    /// Path the leaf read.
    pub path: String,
    /// Operators of the leaf, in order.
    pub operators: Vec<&'static str>,
    /// Leaf result.
    pub result: bool,
}

/// Trace that records leaf outcomes in evaluation order.
#[derive(Debug, Default)]
pub struct LeafRecorder {
    /// Outcomes in evaluation order; short-circuited leaves are absent.
    outcomes: Vec<LeafOutcome>,
}

impl LeafRecorder {
    /// Returns the recorded outcomes.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<LeafOutcome> {
        self.outcomes
    }
}

impl ExpressionTrace<FieldCondition> for LeafRecorder {
    fn on_predicate(&mut self, predicate: &FieldCondition, result: bool) {
        self.outcomes.push(LeafOutcome {
            path: predicate.path.as_str().to_string(),
            operators: predicate.operators.iter().map(|operator| operator.operator()).collect(),
            result,
        });
    }
}
