//! From submission to rendered signature

use crate::company::generate_company_email;
use crate::normalize::{capitalize_first, safe_filename, smart_title};
use crate::phone::PhoneNumber;
use crate::render::render_signature_html;
use crate::thumbnail::ThumbnailRules;
use crate::types::{GeneratedSignature, ResolvedSignatureData, SubmissionFields};
use crate::validate::{ValidationReport, validate_submission};
use tracing::debug;

/// Derive everything the template needs from a submission
#[must_use]
pub fn resolve_signature(fields: &SubmissionFields, rules: &ThumbnailRules) -> ResolvedSignatureData {
    let first_name = smart_title(&fields.name);
    let last_name = smart_title(&fields.surname);
    let full_name = format!("{first_name} {last_name}").trim().to_string();

    let phone = PhoneNumber::parse(&fields.phone);
    let tel_link = phone.tel_link();

    let company_email = generate_company_email(&first_name, &last_name);
    let mailto_link = format!("mailto:{company_email}");

    let favourite_caption = if first_name.is_empty() {
        "Favourite".to_string()
    } else {
        format!("{first_name}'s favourite")
    };

    let thumbnail = rules.pick(&fields.favourite_bonbon);
    debug!(
        "Resolved signature for '{}' with thumbnail '{}'",
        full_name, thumbnail.label
    );

    ResolvedSignatureData {
        full_name,
        job_title: capitalize_first(&fields.job_title),
        phone_display: fields.phone.trim().to_string(),
        phone,
        tel_link,
        company_email,
        mailto_link,
        favourite_bonbon: fields.favourite_bonbon.trim().to_string(),
        favourite_caption,
        thumbnail,
        first_name,
        last_name,
    }
}

/// Attachment name for a person's signature
#[must_use]
pub fn signature_filename(first_name: &str, last_name: &str) -> String {
    format!("{}_signature.html", safe_filename(first_name, last_name))
}

/// Renders signatures against one rule set
#[derive(Debug, Clone, Default)]
pub struct SignatureGenerator {
    rules: ThumbnailRules,
}

impl SignatureGenerator {
    #[must_use]
    pub const fn new(rules: ThumbnailRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn rules(&self) -> &ThumbnailRules {
        &self.rules
    }

    /// Swap in a freshly loaded rule set
    pub fn replace_rules(&mut self, rules: ThumbnailRules) {
        self.rules = rules;
    }

    #[must_use]
    pub fn resolve(&self, fields: &SubmissionFields) -> ResolvedSignatureData {
        resolve_signature(fields, &self.rules)
    }

    /// Render without validating; blank fields render blank
    #[must_use]
    pub fn generate(&self, fields: &SubmissionFields) -> GeneratedSignature {
        let data = self.resolve(fields);
        let html = render_signature_html(&data);
        let filename = signature_filename(&data.first_name, &data.last_name);

        GeneratedSignature {
            data,
            html,
            filename,
        }
    }

    /// Validate first, rendering only a clean submission
    pub fn generate_validated(
        &self,
        fields: &SubmissionFields,
    ) -> Result<GeneratedSignature, ValidationReport> {
        let report = validate_submission(fields);
        if report.is_valid() {
            Ok(self.generate(fields))
        } else {
            Err(report)
        }
    }
}
