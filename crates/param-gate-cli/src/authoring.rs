// crates/param-gate-cli/src/authoring.rs
// ============================================================================
// Module: Authoring Formats
// Description: Schema and value-tree parsing for JSON, YAML, and RON inputs.
// Purpose: Turn authored files into core types through one JSON value model.
// Dependencies: param-gate-core, ron, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Every authoring format is first parsed into a [`serde_json::Value`] and only
//! then deserialized into core types, so JSON, YAML, and RON inputs share a
//! single deserialization path and identical canonical fingerprints.
//! Security posture: authoring inputs are untrusted; callers bound their size
//! before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use param_gate_core::ParameterNode;
use param_gate_core::ValueTree;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Authoring Formats
// ============================================================================

/// Supported authoring formats for schemas and value trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringFormat {
    /// JSON, the canonical format.
    Json,
    /// YAML authoring format.
    Yaml,
    /// RON authoring format.
    Ron,
}

impl AuthoringFormat {
    /// Returns the lowercase label for the format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Ron => "ron",
        }
    }

    /// Parses a format from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

impl fmt::Display for AuthoringFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading authoring inputs.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// Failed to parse the authoring input.
    #[error("failed to parse {format} input: {error}")]
    Parse {
        /// Format that failed to parse.
        format: AuthoringFormat,
        /// Underlying parse error message.
        error: String,
    },
    /// Parsed input does not describe a parameter schema.
    #[error("failed to deserialize schema: {error}")]
    Schema {
        /// Deserialization error details.
        error: String,
    },
    /// Value trees must be objects at the root.
    #[error("value tree root must be an object, found {found}")]
    ValuesRoot {
        /// JSON type found at the root.
        found: &'static str,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Detects the authoring format from a file path.
#[must_use]
pub fn detect_format(path: &Path) -> Option<AuthoringFormat> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(AuthoringFormat::from_extension)
}

/// Parses authoring input into a JSON value.
///
/// # Errors
///
/// Returns [`AuthoringError::Parse`] when the input is malformed.
pub fn parse_value(input: &str, format: AuthoringFormat) -> Result<Value, AuthoringError> {
    let parse_error = |error: String| AuthoringError::Parse {
        format,
        error,
    };
    match format {
        AuthoringFormat::Json => {
            serde_json::from_str(input).map_err(|err| parse_error(err.to_string()))
        }
        AuthoringFormat::Yaml => {
            serde_yaml::from_str(input).map_err(|err| parse_error(err.to_string()))
        }
        AuthoringFormat::Ron => ron::from_str(input).map_err(|err| parse_error(err.to_string())),
    }
}

/// Parses an authored parameter schema.
///
/// The result is structurally typed but not validated; run it through the
/// core validator before use.
///
/// # Errors
///
/// Returns [`AuthoringError`] when parsing or deserialization fails.
pub fn parse_schema(
    input: &str,
    format: AuthoringFormat,
) -> Result<ParameterNode, AuthoringError> {
    let value = parse_value(input, format)?;
    serde_json::from_value(value).map_err(|err| AuthoringError::Schema {
        error: err.to_string(),
    })
}

/// Parses an authored value tree.
///
/// # Errors
///
/// Returns [`AuthoringError`] when parsing fails or the root is not an object.
pub fn parse_values(input: &str, format: AuthoringFormat) -> Result<ValueTree, AuthoringError> {
    let value = parse_value(input, format)?;
    if !value.is_object() {
        return Err(AuthoringError::ValuesRoot {
            found: json_type_label(&value),
        });
    }
    Ok(ValueTree::new(value))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the JSON type name of a value.
const fn json_type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
