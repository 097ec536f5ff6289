//! Text normalization for place-name comparison

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Decompose, drop combining marks, lowercase, trim.
///
/// Used for trial city/state strings and canonical governorate names.
pub fn normalize_location(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// [`normalize_location`] plus removal of a trailing number.
///
/// Map geometry labels carry numeric suffixes to tell fragments of one
/// region apart ("Kebili 2"). Only region labels go through this rule;
/// trial locations never do.
pub fn normalize_region_label(label: &str) -> String {
    let base = normalize_location(label);
    base.trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end()
        .to_string()
}
