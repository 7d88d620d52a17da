//! Phone number cleaning, normalization and format checks

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Phone number with its normalized international form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneNumber {
    pub raw: String,
    pub normalized: String,
    pub kind: PhoneKind,
    pub country_code: Option<String>,
}

/// Shape of a phone number, judged on its cleaned form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhoneKind {
    DutchMobile,
    DutchLandline,
    International,
    Unknown,
}

static SEPARATOR_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[\s\-()]").unwrap());

static DUTCH_MOBILE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^(\+31|0031|0)6[0-9]{8}$").unwrap());

static DUTCH_LANDLINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^(\+31|0031|0)[1-9][0-9]{7,8}$").unwrap());

static E164_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap());

impl PhoneNumber {
    /// Clean, classify and normalize a phone number as typed
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned = clean_phone(raw);
        let normalized = normalize_phone(raw);
        let kind = detect_phone_kind(&cleaned);
        let country_code = normalized
            .starts_with("+31")
            .then(|| "31".to_string());

        Self {
            raw: raw.trim().to_string(),
            normalized,
            kind,
            country_code,
        }
    }

    /// Whether the number passed one of the accepted formats
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind != PhoneKind::Unknown
    }

    /// `tel:` URI for this number
    #[must_use]
    pub fn tel_link(&self) -> String {
        format!("tel:{}", self.normalized)
    }
}

/// Remove whitespace, dashes and parentheses
#[must_use]
pub fn clean_phone(phone: &str) -> String {
    SEPARATOR_REGEX.replace_all(phone, "").into_owned()
}

/// Convert a phone number to international dialing form.
///
/// A leading `0` is read as the Dutch trunk prefix and replaced by `+31`;
/// the length is not checked first, so malformed short numbers are still
/// prefixed. Anything else without a `+` gets one prepended, so blank input
/// comes back as a bare `+`.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    let clean = clean_phone(phone);

    if clean.starts_with("06") && clean.chars().count() == 10 {
        format!("+31{}", &clean[1..])
    } else if clean.starts_with('0') && !clean.starts_with("06") {
        format!("+31{}", &clean[1..])
    } else if clean.starts_with('+') {
        clean
    } else {
        format!("+{clean}")
    }
}

/// `tel:` URI for a phone number as typed
#[must_use]
pub fn build_tel_link(phone: &str) -> String {
    format!("tel:{}", normalize_phone(phone))
}

/// Accept Dutch mobile, Dutch landline or E.164-like numbers
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    detect_phone_kind(&clean_phone(phone)) != PhoneKind::Unknown
}

fn detect_phone_kind(cleaned: &str) -> PhoneKind {
    if DUTCH_MOBILE_REGEX.is_match(cleaned) {
        PhoneKind::DutchMobile
    } else if DUTCH_LANDLINE_REGEX.is_match(cleaned) {
        PhoneKind::DutchLandline
    } else if E164_REGEX.is_match(cleaned) {
        PhoneKind::International
    } else {
        PhoneKind::Unknown
    }
}
