// crates/param-gate-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Ensure CLI localization remains consistent across supported locales.
// Dependencies: param-gate-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and locale templates keep the placeholder set of English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;

/// Collects `{name}` placeholders, rejecting malformed braces.
fn placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        if rest[start ..].starts_with('}') {
            return Err(format!("unmatched '}}' in {template:?}"));
        }
        let tail = &rest[start + 1 ..];
        let end = tail.find('}').ok_or_else(|| format!("unclosed '{{' in {template:?}"))?;
        let name = &tail[.. end];
        if name.is_empty()
            || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(format!("placeholder {name:?} must use [a-z0-9_]"));
        }
        names.insert(name.to_string());
        rest = &tail[end + 1 ..];
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    assert!(SUPPORTED_LOCALES.contains(&Locale::En), "English must remain the baseline locale");
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let locale_keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, locale_keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate catalog keys ({locale:?})");
    }
}

#[test]
fn catalogs_have_placeholder_parity_with_english() {
    let en_catalog = catalog_for(Locale::En);
    for (key, en_template) in en_catalog {
        let en_names = placeholder_names(en_template).unwrap();
        for locale in SUPPORTED_LOCALES {
            let template = catalog_for(*locale).get(key).copied().unwrap();
            let names = placeholder_names(template)
                .unwrap_or_else(|error| panic!("bad template for {key} ({locale:?}): {error}"));
            assert_eq!(en_names, names, "placeholder mismatch for {key} ({locale:?})");
        }
    }
}

#[test]
fn catalan_differs_for_curated_keys() {
    const CURATED_KEYS: &[&str] =
        &["config.validate.ok", "schema.validate.failed", "i18n.disclaimer.machine_translated"];
    for key in CURATED_KEYS {
        let en = catalog_for(Locale::En).get(key).copied().unwrap();
        let ca = catalog_for(Locale::Ca).get(key).copied().unwrap();
        assert_ne!(en, ca, "catalan must translate {key}");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN"), Some(Locale::En));
    assert_eq!(Locale::parse("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse("en_us"), Some(Locale::En));
    assert_eq!(Locale::parse("ca"), Some(Locale::Ca));
    assert_eq!(Locale::parse("ca_ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse(" "), None);
    assert_eq!(Locale::parse("de"), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate(
        "input.read_failed",
        vec![
            MessageArg::new("kind", "schema"),
            MessageArg::new("path", "form.yaml"),
            MessageArg::new("error", "denied"),
        ],
    );
    assert!(output.contains("form.yaml"));
    assert!(output.contains("denied"));
}

#[test]
fn translate_ignores_extra_arguments() {
    let output = translate("config.validate.ok", vec![MessageArg::new("extra", "value")]);
    assert!(!output.contains("value"));
}

#[test]
fn unknown_keys_fall_back_to_the_key() {
    assert_eq!(translate("nonexistent.key", vec![]), "nonexistent.key");
}
