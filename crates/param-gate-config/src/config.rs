// crates/param-gate-config/src/config.rs
// ============================================================================
// Module: Param Gate Configuration
// Description: Configuration loading and validation for Param Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: param-gate-core, param-logic, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `PARAM_GATE_CONFIG`, then
//! `param-gate.toml` in the working directory. Only the implicit default file
//! may be absent; an explicit path that cannot be read is an error.
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use param_gate_core::LocaleResolver;
use param_gate_core::QueryLimits;
use param_gate_core::SchemaLimits;
use param_logic::ExpressionLimits;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "param-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PARAM_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a locale tag.
pub(crate) const MAX_LOCALE_LENGTH: usize = 35;

/// Default maximum schema depth.
pub(crate) const DEFAULT_MAX_SCHEMA_DEPTH: usize = 32;
/// Maximum allowed schema depth.
pub(crate) const MAX_SCHEMA_DEPTH: usize = 256;
/// Default maximum schema node count.
pub(crate) const DEFAULT_MAX_SCHEMA_NODES: usize = 4096;
/// Maximum allowed schema node count.
pub(crate) const MAX_SCHEMA_NODES: usize = 65_536;
/// Default maximum condition nesting depth.
pub(crate) const DEFAULT_MAX_CONDITION_DEPTH: usize = 16;
/// Maximum allowed condition nesting depth.
pub(crate) const MAX_CONDITION_DEPTH: usize = 64;
/// Default maximum predicates per condition.
pub(crate) const DEFAULT_MAX_CONDITION_PREDICATES: usize = 256;
/// Maximum allowed predicates per condition.
pub(crate) const MAX_CONDITION_PREDICATES: usize = 4096;
/// Default maximum `$regex` pattern size in bytes.
pub(crate) const DEFAULT_MAX_REGEX_BYTES: usize = 1024;
/// Maximum allowed `$regex` pattern size in bytes.
pub(crate) const MAX_REGEX_BYTES: usize = 64 * 1024;
/// Default maximum schema or value file size in bytes.
pub(crate) const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
/// Maximum allowed schema or value file size in bytes.
pub(crate) const MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;
/// Default locale for presentation text.
pub(crate) const DEFAULT_LOCALE: &str = "en_US";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Param Gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParamGateConfig {
    /// Resource limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Rendering defaults.
    #[serde(default)]
    pub render: RenderConfig,
}

impl ParamGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;
        self.audit.validate()?;
        self.render.validate()?;
        Ok(())
    }

    /// Returns the schema validation limits.
    #[must_use]
    pub const fn schema_limits(&self) -> SchemaLimits {
        self.limits.schema_limits()
    }

    /// Returns the standalone query parsing limits.
    #[must_use]
    pub const fn query_limits(&self) -> QueryLimits {
        self.limits.query_limits()
    }

    /// Returns the locale resolver for the configured locales.
    #[must_use]
    pub fn locale_resolver(&self) -> LocaleResolver {
        self.render.resolver(None)
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Resource limits for schemas, conditions, and input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum node depth below the schema root.
    #[serde(default = "default_max_schema_depth")]
    pub max_schema_depth: usize,
    /// Maximum number of schema nodes.
    #[serde(default = "default_max_schema_nodes")]
    pub max_schema_nodes: usize,
    /// Maximum nesting depth of one display condition.
    #[serde(default = "default_max_condition_depth")]
    pub max_condition_depth: usize,
    /// Maximum predicates in one display condition.
    #[serde(default = "default_max_condition_predicates")]
    pub max_condition_predicates: usize,
    /// Maximum `$regex` pattern size in bytes.
    #[serde(default = "default_max_regex_bytes")]
    pub max_regex_bytes: usize,
    /// Maximum size of a schema or value file in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_schema_depth: default_max_schema_depth(),
            max_schema_nodes: default_max_schema_nodes(),
            max_condition_depth: default_max_condition_depth(),
            max_condition_predicates: default_max_condition_predicates(),
            max_regex_bytes: default_max_regex_bytes(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        check_range("limits.max_schema_depth", self.max_schema_depth, MAX_SCHEMA_DEPTH)?;
        check_range("limits.max_schema_nodes", self.max_schema_nodes, MAX_SCHEMA_NODES)?;
        check_range("limits.max_condition_depth", self.max_condition_depth, MAX_CONDITION_DEPTH)?;
        check_range(
            "limits.max_condition_predicates",
            self.max_condition_predicates,
            MAX_CONDITION_PREDICATES,
        )?;
        check_range("limits.max_regex_bytes", self.max_regex_bytes, MAX_REGEX_BYTES)?;
        check_range("limits.max_input_bytes", self.max_input_bytes, MAX_INPUT_BYTES)?;
        Ok(())
    }

    /// Converts to query parsing limits.
    #[must_use]
    pub const fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            expression: ExpressionLimits {
                max_depth: self.max_condition_depth,
                max_predicates: self.max_condition_predicates,
                allow_empty_groups: true,
            },
            max_regex_bytes: self.max_regex_bytes,
        }
    }

    /// Converts to schema validation limits.
    #[must_use]
    pub const fn schema_limits(&self) -> SchemaLimits {
        SchemaLimits {
            max_depth: self.max_schema_depth,
            max_nodes: self.max_schema_nodes,
            query: self.query_limits(),
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Destination of structured audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on standard error.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Audit logging disabled.
    None,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Audit sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (JSON lines), required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path requires audit.sink=file".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Render
// ============================================================================

/// Rendering defaults for effective fields and submissions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Preferred locale for presentation text.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locale consulted when the preferred one is missing.
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
    /// Fill absent visible leaves from defaults on submission.
    #[serde(default = "default_apply_defaults")]
    pub apply_defaults: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            fallback_locale: default_locale(),
            apply_defaults: default_apply_defaults(),
        }
    }
}

impl RenderConfig {
    /// Validates locale tags.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_locale("render.default_locale", &self.default_locale)?;
        validate_locale("render.fallback_locale", &self.fallback_locale)
    }

    /// Returns a resolver preferring `locale` over the configured default.
    #[must_use]
    pub fn resolver(&self, locale: Option<&str>) -> LocaleResolver {
        let preferred = locale.unwrap_or(self.default_locale.as_str());
        LocaleResolver::new(preferred, self.fallback_locale.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag is true unless the default name is used.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Checks that a limit lies in `1 ..= max`.
fn check_range(field: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::Invalid(format!("{field} out of range (1..={max})")));
    }
    Ok(())
}

/// Validates a locale tag such as `en_US` or `zh-Hans`.
fn validate_locale(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.len() > MAX_LOCALE_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} must be 1-{MAX_LOCALE_LENGTH} bytes")));
    }
    if !value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-') {
        return Err(ConfigError::Invalid(format!("{field} has invalid characters")));
    }
    Ok(())
}

/// Default schema depth limit.
const fn default_max_schema_depth() -> usize {
    DEFAULT_MAX_SCHEMA_DEPTH
}

/// Default schema node limit.
const fn default_max_schema_nodes() -> usize {
    DEFAULT_MAX_SCHEMA_NODES
}

/// Default condition depth limit.
const fn default_max_condition_depth() -> usize {
    DEFAULT_MAX_CONDITION_DEPTH
}

/// Default condition predicate limit.
const fn default_max_condition_predicates() -> usize {
    DEFAULT_MAX_CONDITION_PREDICATES
}

/// Default regex pattern limit.
const fn default_max_regex_bytes() -> usize {
    DEFAULT_MAX_REGEX_BYTES
}

/// Default input file limit.
const fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

/// Default locale tag.
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Defaults are applied on submission unless disabled.
const fn default_apply_defaults() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn default_limits_match_core_defaults() {
        let limits = LimitsConfig::default().schema_limits();
        assert_eq!(limits, SchemaLimits::default());
        assert_eq!(LimitsConfig::default().query_limits(), QueryLimits::default());
    }

    #[test]
    fn explicit_paths_are_flagged() {
        let (path, explicit) = resolve_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.toml"));
        assert!(explicit);
    }

    #[test]
    fn check_range_bounds_are_inclusive() {
        assert!(check_range("x", 1, 4).is_ok());
        assert!(check_range("x", 4, 4).is_ok());
        assert!(check_range("x", 0, 4).is_err());
        assert!(check_range("x", 5, 4).unwrap_err().to_string().contains("x out of range"));
    }

    #[test]
    fn validate_path_string_rejects_component_too_long() {
        let long_component = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let result = validate_path_string("audit.path", &format!("./{long_component}"));
        assert!(result.unwrap_err().to_string().contains("audit.path path component too long"));
    }

    #[test]
    fn validate_locale_accepts_common_tags() {
        for tag in ["en_US", "zh-Hans", "de"] {
            assert!(validate_locale("render.default_locale", tag).is_ok(), "{tag}");
        }
        assert!(validate_locale("render.default_locale", "en US").is_err());
        assert!(validate_locale("render.default_locale", "").is_err());
    }
}
