//! Company e-mail address derivation

use regex::Regex;

/// Domain every company address lives under
pub const COMPANY_DOMAIN: &str = "madaq.com";

static NON_WORD_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Derive `{first initial}.{surname}@madaq.com`.
///
/// Returns an empty string when either name part is blank. Non-word
/// characters are dropped from the surname, so compound names collapse
/// ("van der Berg" becomes `vanderberg`).
#[must_use]
pub fn generate_company_email(first_name: &str, last_name: &str) -> String {
    let first = first_name.trim();
    let last = last_name.trim();

    let Some(initial) = first.chars().next() else {
        return String::new();
    };
    if last.is_empty() {
        return String::new();
    }

    let initial: String = initial.to_lowercase().collect();
    let clean_last = NON_WORD_REGEX.replace_all(last, "").to_lowercase();

    format!("{initial}.{clean_last}@{COMPANY_DOMAIN}")
}
