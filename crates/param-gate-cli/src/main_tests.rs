// crates/param-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and bounded input helpers.
// Purpose: Ensure CLI inputs fail closed and flags map onto core options.
// Dependencies: param-gate-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates bounded reads, format detection, locale selection, and the
//! mapping from CLI flags to submission options.
//!
//! Security posture: CLI inputs are untrusted; size limits must fail closed.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap::Parser;
use param_gate_cli::authoring::AuthoringFormat;
use param_gate_cli::i18n::Locale;
use param_gate_config::ParamGateConfig;
use tempfile::TempDir;

use super::Cli;
use super::Commands;
use super::LangArg;
use super::QueryCommand;
use super::ReadLimitError;
use super::SchemaCommand;
use super::parse_expression_json;
use super::read_bytes_with_limit;
use super::read_text_input;
use super::resolve_authoring_format;
use super::resolve_locale;
use super::submission_options;

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn schema_validate_parses_positional_schema() {
    let cli = Cli::try_parse_from(["param-gate", "schema", "validate", "form.yaml"]).unwrap();
    match cli.command {
        Some(Commands::Schema {
            command: SchemaCommand::Validate(args),
        }) => assert_eq!(args.schema, Path::new("form.yaml")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_follow_subcommands() {
    let cli = Cli::try_parse_from([
        "param-gate",
        "query",
        "eval",
        "--expr",
        "{\"a\":1}",
        "--values",
        "values.json",
        "--explain",
        "--format",
        "ron",
        "--lang",
        "ca",
    ])
    .unwrap();
    assert!(cli.format.is_some());
    assert!(matches!(cli.lang, Some(LangArg::Ca)));
    match cli.command {
        Some(Commands::Query {
            command: QueryCommand::Eval(command),
        }) => {
            assert!(command.explain);
            assert_eq!(command.expr, "{\"a\":1}");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn resolve_requires_values() {
    assert!(Cli::try_parse_from(["param-gate", "resolve", "form.json"]).is_err());
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

#[test]
fn read_bytes_with_limit_allows_small_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.json");
    fs::write(&path, b"{}").unwrap();
    let bytes = read_bytes_with_limit(&path, 16).unwrap();
    assert_eq!(bytes, b"{}");
}

#[test]
fn read_bytes_with_limit_rejects_large_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("large.json");
    fs::write(&path, vec![b' '; 32]).unwrap();
    match read_bytes_with_limit(&path, 16) {
        Err(ReadLimitError::TooLarge {
            size,
            limit,
        }) => {
            assert_eq!(size, 32);
            assert_eq!(limit, 16);
        }
        other => panic!("expected size rejection, got {other:?}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    let result = read_bytes_with_limit(&dir.path().join("absent.json"), 16);
    assert!(matches!(result, Err(ReadLimitError::Io(_))));
}

#[test]
fn read_text_input_rejects_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.json");
    fs::write(&path, [0xff_u8, 0xfe]).unwrap();
    let err = read_text_input(&path, "value tree", 16).unwrap_err();
    assert!(err.to_string().contains("UTF-8"), "{err}");
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

#[test]
fn authoring_format_prefers_override() {
    let format = resolve_authoring_format(Path::new("form.json"), Some(AuthoringFormat::Ron));
    assert_eq!(format.unwrap(), AuthoringFormat::Ron);
    let detected = resolve_authoring_format(Path::new("form.YML"), None);
    assert_eq!(detected.unwrap(), AuthoringFormat::Yaml);
    assert!(resolve_authoring_format(Path::new("form.txt"), None).is_err());
}

#[test]
fn locale_prefers_flag_over_environment() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca_ES")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
    let err = resolve_locale(None, Some("de")).unwrap_err();
    assert!(err.to_string().contains("PARAM_GATE_LANG"), "{err}");
}

#[test]
fn defaults_need_config_and_flag() {
    let mut config = ParamGateConfig::default();
    assert!(submission_options(&config, false).apply_defaults);
    assert!(!submission_options(&config, true).apply_defaults);
    config.render.apply_defaults = false;
    assert!(!submission_options(&config, false).apply_defaults);
}

#[test]
fn inline_expressions_are_bounded_and_parsed() {
    assert!(parse_expression_json("{\"a\":{\"$gt\":1}}", 64).unwrap().is_object());
    assert!(parse_expression_json("{\"a\":", 64).is_err());
    let err = parse_expression_json("{\"a\":1}", 4).unwrap_err();
    assert!(err.to_string().contains("limit 4"), "{err}");
}
