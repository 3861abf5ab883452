/// Private helper functions for text cleaning
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// Unicode-aware, so U+00A0 collapses too
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize Unicode to NFC (Canonical Composition).
///
/// Team names arrive both precomposed and decomposed depending on the source.
pub(super) fn normalize_unicode(text: &str) -> String {
    text.nfc().collect::<String>()
}

/// Remove zero-width characters (U+200B, U+200C, U+200D, U+FEFF).
pub(super) fn remove_zero_width_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .collect()
}

/// Remove control characters except newlines and tabs, which the whitespace
/// pass folds into spaces.
pub(super) fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Collapse whitespace runs into one space and trim.
pub(super) fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
