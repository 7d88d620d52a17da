//! Text normalization helpers for names, titles and file names

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// File name stem used when a name yields no usable characters
pub const DEFAULT_FILENAME: &str = "signature";

/// Title-case a name, capitalising each part separated by whitespace,
/// hyphens or apostrophes.
///
/// ```rust
/// use madaq_signature::smart_title;
///
/// assert_eq!(smart_title("van-der berg"), "Van-Der Berg");
/// assert_eq!(smart_title("d'angelo"), "D'Angelo");
/// ```
#[must_use]
pub fn smart_title(name: &str) -> String {
    let name = name.trim();
    let mut out = String::with_capacity(name.len());
    let mut at_start = true;

    for c in name.chars() {
        if c.is_whitespace() || c == '-' || c == '\'' {
            out.push(c);
            at_start = true;
        } else if at_start {
            out.extend(c.to_uppercase());
            at_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Upper-case the first character only, leaving the rest untouched
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Strip diacritics via compatibility decomposition.
///
/// Only meant for file names and matching, never for display.
#[must_use]
pub fn remove_accents(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Build an ASCII alphanumeric file stem from a first and last name
#[must_use]
pub fn safe_filename(first_name: &str, last_name: &str) -> String {
    let raw = format!("{first_name}{last_name}");
    let safe: String = remove_accents(&raw)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if safe.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        safe
    }
}

/// Fold text for keyword comparison: trimmed, lowercase, accent-free
#[must_use]
pub fn fold_keyword(s: &str) -> String {
    remove_accents(&s.trim().to_lowercase())
}
