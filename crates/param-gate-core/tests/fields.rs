// crates/param-gate-core/tests/fields.rs
// ============================================================================
// Module: Effective Field Tests
// Description: Renderer projection and locale resolution.
// ============================================================================
//! ## Overview
//! Integration tests for the effective field projection handed to renderers.

mod support;

use param_gate_core::I18nText;
use param_gate_core::LocaleResolver;
use param_gate_core::TextResolver;
use param_gate_core::effective_fields;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::compiled;
use support::ensure;
use support::settings;
use support::values;

/// Schema with localized presentation text.
fn labelled() -> Value {
    json!({
        "name": "root",
        "type": "object",
        "children": [
            {
                "name": "city",
                "type": "string",
                "label": { "en_US": "City", "de_DE": "Stadt" },
                "help": { "ja_JP": "都市" },
                "placeholder": { "en_US": "Berlin" }
            },
            {
                "name": "secret",
                "type": "credential_reference",
                "provider": "vault",
                "required": true
            }
        ]
    })
}

#[test]
fn locale_resolution_falls_back() -> TestResult {
    let text = I18nText::from_pairs([("en_US", "City"), ("de_DE", "Stadt")]);
    let german = LocaleResolver::new("de_DE", "en_US");
    let french = LocaleResolver::new("fr_FR", "en_US");
    let no_fallback = LocaleResolver::new("fr_FR", "es_ES");
    ensure(german.resolve(&text) == Some("Stadt"), "requested locale")?;
    ensure(french.resolve(&text) == Some("City"), "fallback locale")?;
    ensure(no_fallback.resolve(&text) == Some("Stadt"), "first entry by locale key")?;
    ensure(german.resolve(&I18nText::default()).is_none(), "empty text")
}

#[test]
fn fields_carry_resolved_text() -> TestResult {
    let schema = compiled(labelled())?;
    let german = LocaleResolver::new("de_DE", "en_US");
    let fields = effective_fields(&schema, &values(json!({ "city": "Bonn" })), &german);
    ensure(fields.len() == 2, format!("{} fields", fields.len()))?;
    let city = &fields[0];
    ensure(city.value_path.as_deref() == Some("city"), "value path")?;
    ensure(city.kind == "string", city.kind)?;
    ensure(city.label.as_deref() == Some("Stadt"), "label")?;
    ensure(city.help.as_deref() == Some("都市"), "help falls back to first entry")?;
    ensure(city.placeholder.as_deref() == Some("Berlin"), "placeholder")?;
    ensure(city.value == Some(json!("Bonn")), "value")?;

    let secret = &fields[1];
    ensure(secret.kind == "credential_reference", secret.kind)?;
    ensure(secret.required, "required flag")?;
    ensure(secret.value.is_none() && secret.label.is_none(), "no value, no label")
}

#[test]
fn only_visible_fields_in_document_order() -> TestResult {
    let schema = compiled(settings())?;
    let resolver = LocaleResolver::default();

    let basic = effective_fields(&schema, &values(json!({})), &resolver);
    let addresses: Vec<String> = basic.iter().map(|field| field.address.to_string()).collect();
    ensure(addresses == ["mode", "output", "tags", "tags[]"], format!("{addresses:?}"))?;
    ensure(basic[3].value_path.is_none(), "array items have no value path")?;
    ensure(basic[0].default == Some(json!("basic")), "default carried")?;

    let advanced = effective_fields(
        &schema,
        &values(json!({
            "mode": "advanced",
            "advanced": { "retries": 1 },
            "output": { "format": "markdown" }
        })),
        &resolver,
    );
    let addresses: Vec<String> = advanced.iter().map(|field| field.address.to_string()).collect();
    ensure(
        addresses
            == [
                "mode",
                "advanced",
                "advanced.retries",
                "advanced.token",
                "output",
                "output@1.format",
                "output@1.heading",
                "tags",
                "tags[]",
            ],
        format!("{addresses:?}"),
    )?;
    ensure(advanced[3].kind == "encrypted_string", advanced[3].kind)
}

#[test]
fn fields_serialize_without_empty_entries() -> TestResult {
    let schema = compiled(labelled())?;
    let fields = effective_fields(&schema, &values(json!({})), &LocaleResolver::default());
    let rendered = serde_json::to_value(&fields[1])?;
    ensure(
        rendered
            == json!({
                "address": "secret",
                "value_path": "secret",
                "kind": "credential_reference",
                "required": true
            }),
        format!("{rendered}"),
    )
}
