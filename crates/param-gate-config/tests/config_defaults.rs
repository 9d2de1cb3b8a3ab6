//! Config defaults and validation tests for param-gate-config.
// crates/param-gate-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Validation Tests
// Description: Validate default behavior and section invariants.
// Purpose: Ensure an empty config is valid and bounds are enforced.
// =============================================================================

use param_gate_config::AuditSinkKind;
use param_gate_config::ParamGateConfig;
use param_gate_core::I18nText;
use param_gate_core::SchemaLimits;
use param_gate_core::TextResolver;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn empty_config_validates_with_defaults() -> TestResult {
    let config = common::config_from_toml("").map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config != ParamGateConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    if config.schema_limits() != SchemaLimits::default() {
        return Err("default limits should match the core defaults".to_string());
    }
    if config.audit.sink != AuditSinkKind::Stderr || !config.render.apply_defaults {
        return Err("unexpected audit or render defaults".to_string());
    }
    Ok(())
}

#[test]
fn limits_flow_into_schema_limits() -> TestResult {
    let config = ParamGateConfig::from_toml(
        "[limits]\nmax_schema_depth = 4\nmax_condition_depth = 3\nmax_regex_bytes = 16\n",
    )
    .map_err(|err| err.to_string())?;
    let limits = config.schema_limits();
    if limits.max_depth != 4 || limits.query.expression.max_depth != 3 {
        return Err(format!("depth limits not applied: {}", limits.max_depth));
    }
    if limits.query.max_regex_bytes != 16 || limits.max_nodes != 4096 {
        return Err("regex or node limit not applied".to_string());
    }
    Ok(())
}

#[test]
fn zero_limits_are_rejected() -> TestResult {
    for field in [
        "max_schema_depth",
        "max_schema_nodes",
        "max_condition_depth",
        "max_condition_predicates",
        "max_regex_bytes",
        "max_input_bytes",
    ] {
        let toml = format!("[limits]\n{field} = 0\n");
        assert_invalid(ParamGateConfig::from_toml(&toml), &format!("limits.{field} out of range"))?;
    }
    Ok(())
}

#[test]
fn oversized_limits_are_rejected() -> TestResult {
    assert_invalid(
        ParamGateConfig::from_toml("[limits]\nmax_schema_depth = 257\n"),
        "limits.max_schema_depth out of range (1..=256)",
    )?;
    assert_invalid(
        ParamGateConfig::from_toml("[limits]\nmax_input_bytes = 67108865\n"),
        "limits.max_input_bytes out of range",
    )
}

#[test]
fn file_sink_requires_a_path() -> TestResult {
    assert_invalid(
        ParamGateConfig::from_toml("[audit]\nsink = \"file\"\n"),
        "audit.sink=file requires audit.path",
    )?;
    assert_invalid(
        ParamGateConfig::from_toml("[audit]\nsink = \"file\"\npath = \"  \"\n"),
        "audit.path must be non-empty",
    )?;
    assert_invalid(
        ParamGateConfig::from_toml("[audit]\nsink = \"none\"\npath = \"audit.log\"\n"),
        "audit.path requires audit.sink=file",
    )?;
    let config = ParamGateConfig::from_toml("[audit]\nsink = \"file\"\npath = \"audit.log\"\n")
        .map_err(|err| err.to_string())?;
    if config.audit.sink != AuditSinkKind::File {
        return Err("file sink not parsed".to_string());
    }
    Ok(())
}

#[test]
fn unknown_sink_is_a_parse_error() -> TestResult {
    assert_invalid(ParamGateConfig::from_toml("[audit]\nsink = \"syslog\"\n"), "config parse error")
}

#[test]
fn locales_are_validated_and_resolved() -> TestResult {
    assert_invalid(
        ParamGateConfig::from_toml("[render]\ndefault_locale = \"en US\"\n"),
        "render.default_locale has invalid characters",
    )?;
    let config = ParamGateConfig::from_toml(
        "[render]\ndefault_locale = \"de_DE\"\nfallback_locale = \"en_US\"\n",
    )
    .map_err(|err| err.to_string())?;
    let text = I18nText::from_pairs([("en_US", "City"), ("de_DE", "Stadt")]);
    if config.locale_resolver().resolve(&text) != Some("Stadt") {
        return Err("configured locale not preferred".to_string());
    }
    if config.render.resolver(Some("fr_FR")).resolve(&text) != Some("City") {
        return Err("fallback locale not used".to_string());
    }
    Ok(())
}
