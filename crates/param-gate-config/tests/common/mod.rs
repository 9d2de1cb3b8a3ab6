// crates/param-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for param-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use param_gate_config::ConfigError;
use param_gate_config::ParamGateConfig;

/// Result type shared by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `ParamGateConfig` without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<ParamGateConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Asserts that a config result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
