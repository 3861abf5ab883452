mod utils;

use utils::*;

/// Normalise text scraped from a table cell.
///
/// Performs the following operations in order:
/// 1. Normalize Unicode to NFC
/// 2. Remove zero-width characters
/// 3. Remove control characters
/// 4. Collapse whitespace (including non-breaking spaces) and trim
///
/// Entities are already decoded by the HTML parser, so they are not touched here.
///
/// # Examples
/// ```
/// use league_scrape::tools::clean::clean_text;
///
/// assert_eq!(clean_text("  Man\u{00A0}City\u{200B} \n"), "Man City");
/// ```
pub fn clean_text(text: &str) -> String {
    let result = normalize_unicode(text);
    let result = remove_zero_width_chars(&result);
    let result = remove_control_chars(&result);
    normalize_whitespace(&result)
}
