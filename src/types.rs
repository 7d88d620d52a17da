//! Core types for submissions and resolved signatures

use crate::phone::PhoneNumber;
use crate::thumbnail::Thumbnail;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fields of a contact submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Surname,
    Email,
    Phone,
    JobTitle,
    FavouriteBonbon,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Surname,
        Self::Email,
        Self::Phone,
        Self::JobTitle,
        Self::FavouriteBonbon,
    ];

    /// Human label used in validation messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "First Name",
            Self::Surname => "Last Name",
            Self::Email => "Personal Email",
            Self::Phone => "Phone Number",
            Self::JobTitle => "Job Title",
            Self::FavouriteBonbon => "Favourite Bonbon",
        }
    }

    /// Line labels accepted by the submission parser, canonical label first.
    ///
    /// The contact-form notification uses the canonical labels; the
    /// employee form summary uses the longer variants.
    #[must_use]
    pub const fn line_labels(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["Name", "First Name"],
            Self::Surname => &["Surname", "Last Name"],
            Self::Email => &["Email", "Personal Email"],
            Self::Phone => &["Phone Number", "Phone"],
            Self::JobTitle => &["Job Title"],
            Self::FavouriteBonbon => &["Favourite bonbon", "Favorite bonbon"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw contact details as submitted; any field may be empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionFields {
    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Personal e-mail address
    pub email: String,

    /// Phone number as typed
    pub phone: String,

    /// Job title as typed
    pub job_title: String,

    /// Favourite bonbon, free text
    pub favourite_bonbon: String,
}

impl SubmissionFields {
    /// Value of a single field
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::JobTitle => &self.job_title,
            Field::FavouriteBonbon => &self.favourite_bonbon,
        }
    }

    pub(crate) fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Surname => &mut self.surname,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::JobTitle => &mut self.job_title,
            Field::FavouriteBonbon => &mut self.favourite_bonbon,
        }
    }

    /// True when every field is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }
}

/// Renders the submission back into the canonical `Label: value` block
impl fmt::Display for SubmissionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in Field::ALL {
            writeln!(f, "{}: {}", field.line_labels()[0], self.get(field))?;
        }
        Ok(())
    }
}

/// Everything the renderer needs, derived from a submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedSignatureData {
    /// Smart-titled first name
    pub first_name: String,

    /// Smart-titled last name
    pub last_name: String,

    /// "First Last", trimmed
    pub full_name: String,

    /// Job title with only its first letter capitalised
    pub job_title: String,

    /// Phone as the person typed it, trimmed
    pub phone_display: String,

    /// Phone normalisation result
    pub phone: PhoneNumber,

    /// `tel:` URI
    pub tel_link: String,

    /// Derived company address, empty if a name part is missing
    pub company_email: String,

    /// `mailto:` URI for the company address
    pub mailto_link: String,

    /// Favourite bonbon text, trimmed
    pub favourite_bonbon: String,

    /// Caption above the bonbon, e.g. "Robert's favourite"
    pub favourite_caption: String,

    /// Selected product thumbnail
    pub thumbnail: Thumbnail,
}

/// A rendered signature ready to be saved or attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSignature {
    /// Data the HTML was rendered from
    pub data: ResolvedSignatureData,

    /// Rendered HTML fragment
    pub html: String,

    /// Attachment/download name, `{safe}_signature.html`
    pub filename: String,
}
