// crates/param-gate-core/src/core/numeric.rs
// ============================================================================
// Module: Param Gate Numeric Helpers
// Description: Decimal-aware handling of JSON numbers.
// Purpose: Compare and truncate numbers without floating-point surprises.
// Dependencies: bigdecimal, serde_json
// ============================================================================

//! ## Overview
//! JSON numbers are parsed into [`BigDecimal`] through their rendered form,
//! so `1` and `1.0` compare equal and large integers keep full precision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::Zero;
use serde_json::Number;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a JSON number into `BigDecimal` with a stable string representation.
#[must_use]
pub fn decimal_from_number(number: &Number) -> Option<BigDecimal> {
    let rendered = number.to_string();
    BigDecimal::from_str(&rendered).ok()
}

/// Orders two JSON numbers by decimal value.
#[must_use]
pub fn decimal_cmp(left: &Number, right: &Number) -> Option<Ordering> {
    let left = decimal_from_number(left)?;
    let right = decimal_from_number(right)?;
    Some(left.cmp(&right))
}

/// Truncates a JSON number toward zero.
#[must_use]
pub fn truncated(number: &Number) -> Option<BigDecimal> {
    decimal_from_number(number).map(|value| value.with_scale(0))
}

/// Returns true when the number truncates to zero.
#[must_use]
pub fn truncates_to_zero(number: &Number) -> bool {
    truncated(number).is_none_or(|value| value.is_zero())
}
