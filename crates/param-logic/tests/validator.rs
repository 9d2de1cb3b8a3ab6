// crates/param-logic/tests/validator.rs
// ============================================================================
// Module: Expression Validator Tests
// Description: Structural limit enforcement and error messages.
// ============================================================================
//! ## Overview
//! Integration tests for expression limits.

mod support;

use param_logic::Expression;
use param_logic::ExpressionError;
use param_logic::ExpressionLimits;
use param_logic::ExpressionValidator;
use param_logic::GroupKind;
use support::Flag;
use support::TestResult;
use support::ensure;

/// Builds a chain of nested `$and` groups `levels` deep ending in a leaf.
fn nested(levels: usize) -> Expression<Flag> {
    let mut expr = Expression::predicate(Flag::Always);
    for _ in 0 .. levels {
        expr = Expression::and(vec![expr]);
    }
    expr
}

#[test]
fn defaults_accept_ordinary_trees() -> TestResult {
    let validator = ExpressionValidator::default();
    validator.validate(&nested(3))?;
    validator.validate(&Expression::<Flag>::or(vec![]))?;
    Ok(())
}

#[test]
fn depth_limit_is_enforced() -> TestResult {
    let validator = ExpressionValidator::new(ExpressionLimits {
        max_depth: 3,
        ..ExpressionLimits::default()
    });
    validator.validate(&nested(2))?;
    let err = validator.validate(&nested(3)).err();
    ensure(
        err == Some(ExpressionError::TooDeep {
            max_depth: 3,
            actual_depth: 4,
        }),
        format!("unexpected result {err:?}"),
    )
}

#[test]
fn predicate_limit_is_enforced() -> TestResult {
    let validator = ExpressionValidator::new(ExpressionLimits {
        max_predicates: 2,
        ..ExpressionLimits::default()
    });
    let expr = Expression::or(vec![
        Expression::predicate(Flag::Always),
        Expression::predicate(Flag::Never),
        Expression::predicate(Flag::set("x")),
    ]);
    let err = validator.validate(&expr).err();
    ensure(
        matches!(
            err,
            Some(ExpressionError::TooManyPredicates {
                max_predicates: 2,
                actual_predicates: 3,
            })
        ),
        format!("unexpected result {err:?}"),
    )
}

#[test]
fn empty_groups_can_be_rejected() -> TestResult {
    let validator = ExpressionValidator::new(ExpressionLimits {
        allow_empty_groups: false,
        ..ExpressionLimits::default()
    });
    let expr = Expression::and(vec![
        Expression::predicate(Flag::Always),
        Expression::<Flag>::nor(vec![]),
    ]);
    let err = validator.validate(&expr).err();
    ensure(err == Some(ExpressionError::EmptyGroup(GroupKind::Nor)), "nested empty $nor")?;
    let message = ExpressionError::EmptyGroup(GroupKind::Nor).to_string();
    ensure(message.contains("$nor"), "message names the operator")?;
    Ok(())
}
