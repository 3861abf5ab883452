//! Shared Selectors
//!
//! The site ships hashed, versioned class names (`module__suffix-hash`) and
//! only the prefix survives a deploy, so every selector here matches on
//! "class contains" rather than an exact class.

/// Selector for `tag` elements whose class attribute contains `marker`.
/// An empty `tag` matches any element.
pub fn class_contains(tag: &str, marker: &str) -> String {
    format!("{tag}[class*={}]", js_string(marker))
}

/// Quote a value as a JSON string literal, which is also a valid CSS and JS string.
pub fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
