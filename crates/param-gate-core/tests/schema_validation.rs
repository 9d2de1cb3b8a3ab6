// crates/param-gate-core/tests/schema_validation.rs
// ============================================================================
// Module: Schema Validation Tests
// Description: Defect detection, completeness, and compilation.
// ============================================================================
//! ## Overview
//! Integration tests for the load-time schema validator.

mod support;

use param_gate_core::DefectKind;
use param_gate_core::ParameterNode;
use param_gate_core::SchemaLimits;
use param_gate_core::SchemaValidator;
use param_gate_core::ValidationResult;
use param_gate_core::validate;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::addr;
use support::ensure;
use support::format_union;
use support::schema;
use support::settings;

/// Validates a schema given in wire form.
fn defects_of(raw: Value) -> TestResult<ValidationResult> {
    Ok(validate(&schema(raw)?))
}

/// Wraps children in an object root.
fn root(children: Value) -> Value {
    json!({ "name": "root", "type": "object", "children": children })
}

/// Asserts exactly one defect of `kind`, located at `address`.
fn single(result: &ValidationResult, kind: DefectKind, address: &str) -> TestResult {
    ensure(result.defects.len() == 1, format!("expected one defect, got {:?}", result.defects))?;
    let defect = &result.defects[0];
    ensure(defect.kind == kind, format!("kind {:?}", defect.kind))?;
    ensure(defect.address == addr(address)?, format!("address {}", defect.address))
}

// ============================================================================
// SECTION: Valid Schemas
// ============================================================================

#[test]
fn fixtures_are_valid() -> TestResult {
    for raw in [settings(), format_union()] {
        let result = defects_of(raw)?;
        ensure(result.is_valid(), format!("unexpected defects {:?}", result.defects))?;
    }
    Ok(())
}

#[test]
fn wire_form_round_trips_through_serde() -> TestResult {
    let node = schema(settings())?;
    let rendered = serde_json::to_value(&node)?;
    let back: ParameterNode = serde_json::from_value(rendered)?;
    ensure(back == node, "schema changed after round trip")
}

// ============================================================================
// SECTION: Defect Kinds
// ============================================================================

#[test]
fn duplicate_sibling_names() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "a", "type": "string" },
        { "name": "b", "type": "boolean" },
        { "name": "a", "type": "integer" }
    ])))?;
    single(&result, DefectKind::DuplicateName, "a")
}

#[test]
fn same_name_in_different_variants_is_allowed() -> TestResult {
    let result = defects_of(json!({
        "name": "root",
        "type": "discriminated_union",
        "discriminator": "kind",
        "variants": [
            { "children": [
                { "name": "kind", "type": "string", "const": "a" },
                { "name": "x", "type": "string" }
            ] },
            { "children": [
                { "name": "kind", "type": "string", "const": "b" },
                { "name": "x", "type": "integer" }
            ] }
        ]
    }))?;
    ensure(result.is_valid(), format!("{:?}", result.defects))
}

#[test]
fn invalid_identifiers() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "ok_1", "type": "string" },
        { "name": "not-ok", "type": "string" }
    ])))?;
    let invalid = result.of_kind(DefectKind::InvalidIdentifier);
    ensure(result.defects.len() == 1, format!("{:?}", result.defects))?;
    ensure(invalid.len() == 1, "one invalid identifier")?;
    ensure(invalid[0].address.to_string() == "not-ok", invalid[0].address.to_string())
}

#[test]
fn array_items_need_no_name() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "tags", "type": "array", "items": { "type": "string" } }
    ])))?;
    ensure(result.is_valid(), format!("{:?}", result.defects))
}

#[test]
fn range_inversions() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "n", "type": "number", "minimum": 2.5, "maximum": 1.0 },
        { "name": "i", "type": "integer", "minimum": 5, "maximum": 4 },
        { "name": "s", "type": "string", "min_length": 3, "max_length": 2 },
        {
            "name": "l",
            "type": "array",
            "min_items": 2,
            "max_items": 1,
            "items": { "type": "boolean" }
        },
        { "name": "fine", "type": "integer", "minimum": 1, "maximum": 1 }
    ])))?;
    let inverted = result.of_kind(DefectKind::RangeInversion);
    ensure(inverted.len() == 4, format!("{:?}", result.defects))?;
    ensure(result.defects.len() == 4, "no other defects")
}

#[test]
fn variants_must_pin_the_discriminator() -> TestResult {
    let result = defects_of(json!({
        "name": "root",
        "type": "discriminated_union",
        "discriminator": "kind",
        "variants": [
            { "children": [{ "name": "kind", "type": "string", "const": "a" }] },
            { "children": [{ "name": "other", "type": "string", "const": "b" }] },
            { "children": [{ "name": "kind", "type": "string", "enum": ["c", "d"] }] },
            { "children": [{ "name": "kind", "type": "integer" }] }
        ]
    }))?;
    let missing = result.of_kind(DefectKind::MissingDiscriminatorConstant);
    let addresses: Vec<String> = missing.iter().map(|defect| defect.address.to_string()).collect();
    ensure(addresses == ["@1", "@2", "@3"], format!("{addresses:?}"))
}

#[test]
fn discriminator_constants_must_be_unique() -> TestResult {
    let result = defects_of(json!({
        "name": "root",
        "type": "discriminated_union",
        "discriminator": "kind",
        "variants": [
            { "children": [{ "name": "kind", "type": "string", "const": "a" }] },
            { "children": [{ "name": "kind", "type": "string", "enum": ["a"] }] }
        ]
    }))?;
    single(&result, DefectKind::DuplicateDiscriminatorConstant, "@1")
}

#[test]
fn unions_need_variants() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "u", "type": "discriminated_union", "discriminator": "kind", "variants": [] }
    ])))?;
    single(&result, DefectKind::EmptyUnion, "u")
}

#[test]
fn dangling_condition_paths() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "mode", "type": "string" },
        { "name": "a", "type": "string", "display": { "show": { "mode": "x" } } },
        { "name": "b", "type": "string", "display": { "hide": { "missing": 1 } } },
        { "name": "c", "type": "string", "display": { "show": { "a.deeper": 1 } } }
    ])))?;
    let dangling = result.of_kind(DefectKind::DanglingConditionPath);
    let addresses: Vec<String> = dangling.iter().map(|defect| defect.address.to_string()).collect();
    ensure(addresses == ["b", "c"], format!("{:?}", result.defects))
}

#[test]
fn conditions_may_reference_any_variant_field() -> TestResult {
    let result = defects_of(root(json!([
        {
            "name": "output",
            "type": "discriminated_union",
            "discriminator": "format",
            "variants": [
                { "children": [
                    { "name": "format", "type": "string", "const": "json" },
                    { "name": "strict", "type": "boolean" }
                ] },
                { "children": [{ "name": "format", "type": "string", "const": "md" }] }
            ]
        },
        { "name": "note", "type": "string", "display": { "show": { "output.strict": true } } }
    ])))?;
    ensure(result.is_valid(), format!("{:?}", result.defects))
}

#[test]
fn array_item_fields_cannot_be_referenced() -> TestResult {
    let result = defects_of(root(json!([
        {
            "name": "rows",
            "type": "array",
            "items": { "type": "object", "children": [{ "name": "id", "type": "string" }] }
        },
        { "name": "x", "type": "string", "display": { "show": { "rows.id": "1" } } }
    ])))?;
    single(&result, DefectKind::DanglingConditionPath, "x")
}

#[test]
fn malformed_and_oversized_conditions() -> TestResult {
    let mut deep = json!({ "a": 1 });
    for _ in 0 .. 20 {
        deep = json!({ "$and": [deep] });
    }
    let result = defects_of(root(json!([
        { "name": "a", "type": "integer" },
        { "name": "b", "type": "string", "display": { "show": { "a": { "$bogus": 1 } } } },
        { "name": "c", "type": "string", "display": { "hide": deep } }
    ])))?;
    let malformed = result.of_kind(DefectKind::MalformedCondition);
    ensure(malformed.len() == 1, format!("{:?}", result.defects))?;
    ensure(result.of_kind(DefectKind::ConditionLimitExceeded).len() == 1, "limit exceeded")
}

#[test]
fn defaults_must_fit_their_node() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "s", "type": "string", "enum": ["a", "b"], "default": "c" },
        { "name": "n", "type": "number", "maximum": 1, "default": 2 },
        { "name": "i", "type": "integer", "default": 1.5 },
        { "name": "f", "type": "boolean", "default": "yes" },
        { "name": "t", "type": "string", "max_length": 2, "default": "abc" },
        { "name": "ok", "type": "integer", "minimum": 0, "default": 0 }
    ])))?;
    let invalid = result.of_kind(DefectKind::InvalidDefault);
    let addresses: Vec<String> = invalid.iter().map(|defect| defect.address.to_string()).collect();
    ensure(addresses == ["s", "n", "i", "f", "t"], format!("{addresses:?}"))
}

#[test]
fn schema_size_limits() -> TestResult {
    let validator = SchemaValidator::new(SchemaLimits {
        max_nodes: 3,
        ..SchemaLimits::default()
    });
    let node = schema(settings())?;
    let result = validator.validate(&node);
    single(&result, DefectKind::SchemaLimitExceeded, "")?;

    let validator = SchemaValidator::new(SchemaLimits {
        max_depth: 1,
        ..SchemaLimits::default()
    });
    let result = validator.validate(&node);
    ensure(result.of_kind(DefectKind::SchemaLimitExceeded).len() == 1, "depth reported once")
}

// ============================================================================
// SECTION: Completeness
// ============================================================================

#[test]
fn every_defect_is_reported_in_one_pass() -> TestResult {
    let broken = root(json!([
        { "name": "a", "type": "string" },
        { "name": "a", "type": "string" },
        { "name": "bad name", "type": "string" },
        { "name": "r", "type": "integer", "minimum": 9, "maximum": 1 },
        { "name": "c", "type": "string", "display": { "show": { "nowhere": 1 } } }
    ]));
    let result = defects_of(broken)?;
    let mut kinds: Vec<DefectKind> = result.defects.iter().map(|defect| defect.kind).collect();
    kinds.sort();
    ensure(
        kinds
            == [
                DefectKind::DuplicateName,
                DefectKind::InvalidIdentifier,
                DefectKind::RangeInversion,
                DefectKind::DanglingConditionPath,
            ],
        format!("{kinds:?}"),
    )
}

#[test]
fn fixing_defects_clears_them_and_reintroducing_restores_them() -> TestResult {
    let fixed = root(json!([
        { "name": "a", "type": "string" },
        { "name": "b", "type": "string" }
    ]));
    ensure(defects_of(fixed)?.is_valid(), "fixed schema is clean")?;
    let reintroduced = root(json!([
        { "name": "a", "type": "string" },
        { "name": "a", "type": "string" }
    ]));
    single(&defects_of(reintroduced)?, DefectKind::DuplicateName, "a")
}

#[test]
fn compilation_refuses_defective_schemas() -> TestResult {
    let node = schema(root(json!([
        { "name": "a", "type": "string", "display": { "show": { "b": 1 } } }
    ])))?;
    let Err(result) = SchemaValidator::default().compile(node) else {
        return Err("compiled a schema with a dangling path".into());
    };
    ensure(!result.is_valid(), "defects returned")?;
    ensure(result.to_string().contains("1 defect"), result.to_string())
}

#[test]
fn defect_codes_are_stable() -> TestResult {
    let result = defects_of(root(json!([
        { "name": "a", "type": "string" },
        { "name": "a", "type": "string" }
    ])))?;
    let rendered = serde_json::to_value(&result)?;
    ensure(
        rendered
            == json!({
                "defects": [{
                    "kind": "duplicate_name",
                    "address": "a",
                    "message": "duplicate sibling name \"a\""
                }]
            }),
        format!("{rendered}"),
    )?;
    ensure(DefectKind::DuplicateName.code() == "duplicate_name", "code")
}
