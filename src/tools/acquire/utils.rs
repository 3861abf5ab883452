use crate::selectors::{class_contains, js_string};

/// Script evaluating to `true` when an element with a class containing `marker` exists.
pub(super) fn class_marker_script(marker: &str) -> String {
    format!(
        "document.querySelector({}) !== null",
        js_string(&class_contains("", marker))
    )
}

/// Script that clicks the first button-like element whose visible text
/// contains one of `patterns` (case-sensitive, patterns tried in order).
///
/// Uses `element.click()` rather than a synthesized mouse event so an overlay
/// sitting on top of the button cannot intercept it. Evaluates to the matched
/// pattern, or an empty string when nothing matched.
pub(super) fn consent_click_script(patterns: &[String]) -> String {
    let patterns_json = serde_json::to_string(patterns).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(() => {{
    const patterns = {patterns_json};
    const candidates = Array.from(document.querySelectorAll('button, [role="button"], a, input[type="button"], input[type="submit"]'));
    for (const pattern of patterns) {{
        for (const el of candidates) {{
            const text = (el.innerText || el.value || el.textContent || '');
            if (text.includes(pattern)) {{
                el.click();
                return pattern;
            }}
        }}
    }}
    return '';
}})()"#
    )
}
