// crates/param-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Param Gate Interfaces
// Description: Host-provided services consumed by the projection stage.
// Purpose: Keep locale and presentation concerns out of the pure evaluator.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how hosts inject context into the core without ambient
//! global state. The evaluator and resolvers never touch these; only
//! [`crate::runtime::effective_fields`] resolves presentation text through a
//! caller-supplied [`TextResolver`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::I18nText;

// ============================================================================
// SECTION: Text Resolution
// ============================================================================

/// Resolves localized presentation text to a single string.
pub trait TextResolver {
    /// Returns the text to display, or `None` when nothing fits.
    fn resolve<'a>(&self, text: &'a I18nText) -> Option<&'a str>;
}

/// Locale lookup with a fallback chain.
///
/// Tries the requested locale, then the fallback locale, then the first
/// available translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolver {
    /// Requested locale.
    locale: String,
    /// Locale used when the requested one is missing.
    fallback: String,
}

impl LocaleResolver {
    /// Default fallback locale.
    pub const DEFAULT_FALLBACK: &'static str = "en_US";

    /// Creates a resolver for `locale` with an explicit fallback.
    #[must_use]
    pub fn new(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback: fallback.into(),
        }
    }

    /// Returns the requested locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FALLBACK, Self::DEFAULT_FALLBACK)
    }
}

impl TextResolver for LocaleResolver {
    fn resolve<'a>(&self, text: &'a I18nText) -> Option<&'a str> {
        text.get(&self.locale).or_else(|| text.get(&self.fallback)).or_else(|| text.first())
    }
}
