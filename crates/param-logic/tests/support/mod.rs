// crates/param-logic/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and mock predicates for expression tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus a mock
//! predicate evaluated against a fixed set of named flags.

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

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use param_logic::PredicateEval;
use serde::Deserialize;
use serde::Serialize;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across expression integration tests.
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
// Mock Predicate
// ========================================================================

/// Flags that are set for a single evaluation.
#[derive(Debug, Default)]
pub struct Flags(pub BTreeSet<&'static str>);

impl Flags {
    /// Builds a flag set from names.
    pub fn of(names: &[&'static str]) -> Self {
        Self(names.iter().copied().collect())
    }
}

/// Mock predicate checking a named flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    /// Holds when the named flag is set.
    Set(String),
    /// Always holds.
    Always,
    /// Never holds.
    Never,
}

impl Flag {
    /// Shorthand for a named flag predicate.
    pub fn set(name: &str) -> Self {
        Self::Set(name.to_string())
    }
}

impl PredicateEval for Flag {
    type Reader<'a> = Flags;

    fn eval(&self, reader: &Self::Reader<'_>) -> bool {
        match self {
            Self::Set(name) => reader.0.contains(name.as_str()),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
