// crates/param-gate-core/src/runtime/comparator.rs
// ============================================================================
// Module: Param Gate Operator Semantics
// Description: Evaluation of query operators against resolved values.
// Purpose: Convert a possibly-missing value into a total boolean outcome.
// Dependencies: bigdecimal, serde_json, crate::core
// ============================================================================

//! ## Overview
//! Each operator receives the value at its path, or `None` when the path is
//! missing. Evaluation is total: type mismatches, missing values, and
//! non-finite arithmetic yield `false` rather than an error.
//!
//! Numbers compare by decimal value (`1 == 1.0`). Strings order
//! lexicographically by code point. No other types are ordered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use bigdecimal::Zero;
use serde_json::Number;
use serde_json::Value;

use crate::core::FieldOperator;
use crate::core::numeric::decimal_cmp;
use crate::core::numeric::truncated;

// ============================================================================
// SECTION: Operator Evaluation
// ============================================================================

/// Evaluates one operator against the value at its path.
#[must_use]
pub fn evaluate_operator(operator: &FieldOperator, value: Option<&Value>) -> bool {
    match operator {
        FieldOperator::Eq(expected) => value.is_some_and(|value| values_equal(value, expected)),
        FieldOperator::Ne(expected) => !value.is_some_and(|value| values_equal(value, expected)),
        FieldOperator::Gt(expected) => ordering(value, expected).is_some_and(Ordering::is_gt),
        FieldOperator::Gte(expected) => ordering(value, expected).is_some_and(Ordering::is_ge),
        FieldOperator::Lt(expected) => ordering(value, expected).is_some_and(Ordering::is_lt),
        FieldOperator::Lte(expected) => ordering(value, expected).is_some_and(Ordering::is_le),
        FieldOperator::In(members) => value.is_some_and(|value| matches_member(members, value)),
        FieldOperator::Nin(members) => !value.is_some_and(|value| matches_member(members, value)),
        FieldOperator::Exists(expected) => value.is_some() == *expected,
        FieldOperator::Regex(matcher) => {
            value.and_then(Value::as_str).is_some_and(|text| matcher.is_match(text))
        }
        FieldOperator::Mod {
            divisor,
            remainder,
        } => value.and_then(Value::as_number).is_some_and(|number| {
            modulo_matches(number, divisor, remainder)
        }),
        FieldOperator::Size(expected) => {
            value.and_then(Value::as_array).is_some_and(|items| items.len() == *expected)
        }
    }
}

// ============================================================================
// SECTION: Equality
// ============================================================================

/// Structural equality with decimal-aware numbers at every depth.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            decimal_cmp(left, right).is_some_and(Ordering::is_eq)
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(left, right)| values_equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, left)| {
                    right.get(key).is_some_and(|right| values_equal(left, right))
                })
        }
        _ => left == right,
    }
}

/// Membership: the value itself, or any element of an array value, is listed.
fn matches_member(members: &[Value], value: &Value) -> bool {
    let listed = |candidate: &Value| members.iter().any(|member| values_equal(candidate, member));
    match value {
        Value::Array(items) => listed(value) || items.iter().any(listed),
        _ => listed(value),
    }
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

/// Orders a resolved value against an operand.
fn ordering(value: Option<&Value>, expected: &Value) -> Option<Ordering> {
    match (value?, expected) {
        (Value::Number(left), Value::Number(right)) => decimal_cmp(left, right),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

// ============================================================================
// SECTION: Arithmetic
// ============================================================================

/// Checks `trunc(value) % trunc(divisor) == trunc(remainder)`.
fn modulo_matches(value: &Number, divisor: &Number, remainder: &Number) -> bool {
    let (Some(value), Some(divisor), Some(remainder)) =
        (truncated(value), truncated(divisor), truncated(remainder))
    else {
        return false;
    };
    if divisor.is_zero() {
        return false;
    }
    &value % &divisor == remainder
}
