// crates/param-gate-config/src/lib.rs
// ============================================================================
// Module: Param Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for param-gate.toml semantics.
// Dependencies: param-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `param-gate-config` defines the configuration model shared by Param Gate
//! hosts and the `param-gate` CLI: resource limits for schema validation and
//! input loading, the audit sink, and rendering defaults. Loading is strict
//! and fail-closed; an invalid file is never partially applied.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
