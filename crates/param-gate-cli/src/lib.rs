// crates/param-gate-cli/src/lib.rs
// ============================================================================
// Module: Param Gate CLI Library
// Description: Shared helpers for the Param Gate command-line interface.
// Purpose: Provide reusable components (i18n, authoring, audit) for the binary.
// Dependencies: param-gate-core, param-gate-config, serde
// ============================================================================

//! ## Overview
//! This library houses the CLI building blocks: the message catalog behind
//! the [`t!`](crate::t) macro, authoring-format loading for schemas and value
//! trees, and the JSON-line audit sinks. The binary entry point (`src/main.rs`) imports
//! these helpers so all user-facing output stays consistent.
//!
//! Security posture: CLI inputs are untrusted and are size-bounded and
//! validated before they reach the core.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Structured audit events and sinks.
pub mod audit;
/// Authoring-format detection and parsing.
pub mod authoring;
/// Internationalization helpers and message catalog.
pub mod i18n;
