//! Format checks for submitted contact details

use crate::phone::is_valid_phone;
use crate::types::{Field, SubmissionFields};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

static EMAIL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static NAME_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[\p{L}\s'.-]+$").unwrap());

const MIN_TEXT_LEN: usize = 2;

/// Check an e-mail address against a permissive RFC-like pattern
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&email.trim().to_lowercase())
}

/// Like [`is_valid_email`], and the domain part after its first dot must
/// be at least two characters long
#[must_use]
pub fn is_valid_email_strict(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    if !EMAIL_REGEX.is_match(&email) {
        return false;
    }

    email
        .split_once('@')
        .and_then(|(_, domain)| domain.split('.').nth(1))
        .is_some_and(|segment| segment.chars().count() >= MIN_TEXT_LEN)
}

/// Check a first or last name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty");
    }
    if name.chars().count() < MIN_TEXT_LEN {
        return Err("Name must be at least 2 characters long");
    }
    if !NAME_REGEX.is_match(name) {
        return Err("Name contains invalid characters");
    }
    Ok(())
}

/// Check a job title
pub fn validate_job_title(title: &str) -> Result<(), &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Job title cannot be empty");
    }
    if title.chars().count() < MIN_TEXT_LEN {
        return Err("Job title must be at least 2 characters long");
    }
    Ok(())
}

/// A single failed check, phrased for the person filling in the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every failed check of a submission, in form order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Messages to show verbatim
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }

    /// Whether a given field failed any check
    #[must_use]
    pub fn has_issue(&self, field: Field) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "• {issue}")?;
        }
        Ok(())
    }
}

/// Run every check over a submission and collect the failures
#[must_use]
pub fn validate_submission(fields: &SubmissionFields) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in [Field::Name, Field::Surname] {
        if let Err(reason) = validate_name(fields.get(field)) {
            report.push(field, format!("{}: {reason}", field.label()));
        }
    }

    if fields.email.trim().is_empty() {
        report.push(Field::Email, "Personal email is required");
    } else if !is_valid_email_strict(&fields.email) {
        report.push(Field::Email, "Please enter a valid email address");
    }

    if fields.phone.trim().is_empty() {
        report.push(Field::Phone, "Phone number is required");
    } else if !is_valid_phone(&fields.phone) {
        report.push(
            Field::Phone,
            "Please enter a valid phone number (Dutch: 06 xxxxxxxx or International: +XX XXX XXX XXXX)",
        );
    }

    if let Err(reason) = validate_job_title(&fields.job_title) {
        report.push(Field::JobTitle, format!("{}: {reason}", Field::JobTitle.label()));
    }

    if fields.favourite_bonbon.trim().is_empty() {
        report.push(Field::FavouriteBonbon, "Favourite bonbon is required");
    }

    debug!("Validated submission: {} issue(s)", report.issues.len());
    report
}
