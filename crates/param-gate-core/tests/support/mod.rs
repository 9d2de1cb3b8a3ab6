// crates/param-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and schema fixtures for core tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus schema
//! fixtures built from their JSON wire form.

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
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;

use param_gate_core::CompiledSchema;
use param_gate_core::FieldPath;
use param_gate_core::ParameterNode;
use param_gate_core::ValueTree;
use param_gate_core::compile;
use serde_json::Value;
use serde_json::json;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Schema Fixtures
// ========================================================================

/// Deserializes a schema from its JSON wire form.
pub fn schema(raw: Value) -> TestResult<ParameterNode> {
    Ok(serde_json::from_value(raw)?)
}

/// Deserializes and compiles a schema.
pub fn compiled(raw: Value) -> TestResult<CompiledSchema> {
    Ok(compile(schema(raw)?)?)
}

/// Wraps JSON as a value tree.
pub fn values(raw: Value) -> ValueTree {
    ValueTree::new(raw)
}

/// Parses a rendered node address.
pub fn addr(text: &str) -> TestResult<FieldPath> {
    FieldPath::parse(text).ok_or_else(|| format!("bad address {text}").into())
}

/// Root union selecting between a JSON and a Markdown output variant.
pub fn format_union() -> Value {
    json!({
        "name": "output",
        "type": "discriminated_union",
        "discriminator": "format",
        "variants": [
            {
                "children": [
                    { "name": "format", "type": "string", "const": "json" },
                    { "name": "schema", "type": "string" }
                ]
            },
            {
                "children": [
                    { "name": "format", "type": "string", "enum": ["markdown"] },
                    { "name": "heading", "type": "string" }
                ]
            }
        ]
    })
}

/// Object root with a toggle, a gated group, and a nested union.
pub fn settings() -> Value {
    json!({
        "name": "settings",
        "type": "object",
        "children": [
            { "name": "mode", "type": "string", "enum": ["basic", "advanced"], "default": "basic" },
            {
                "name": "advanced",
                "type": "object",
                "display": { "show": { "mode": "advanced" } },
                "children": [
                    { "name": "retries", "type": "integer", "minimum": 0, "default": 3 },
                    {
                        "name": "token",
                        "type": "encrypted_string",
                        "display": { "show": { "advanced.retries": { "$gte": 1 } } }
                    }
                ]
            },
            {
                "name": "output",
                "type": "discriminated_union",
                "discriminator": "format",
                "variants": [
                    {
                        "children": [
                            { "name": "format", "type": "string", "const": "json" },
                            { "name": "schema", "type": "string" }
                        ]
                    },
                    {
                        "children": [
                            { "name": "format", "type": "string", "const": "markdown" },
                            { "name": "heading", "type": "string", "default": "Summary" }
                        ]
                    }
                ]
            },
            { "name": "tags", "type": "array", "items": { "type": "string" } }
        ]
    })
}
