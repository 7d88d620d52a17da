// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! Madaq Signature Generator
//!
//! Turns a contact-form submission into a ready-to-use HTML e-mail
//! signature, and optionally mails it to the office over SMTP.
//!
//! # Pipeline
//!
//! - Parse the `Label: value` submission block (or a notification e-mail)
//! - Validate names, phone, e-mail and job title
//! - Derive the company address (`r.morsman@madaq.com`) and a `tel:` link
//! - Pick a bonbon thumbnail from keyword rules
//! - Render the signature table
//!
//! # Example
//!
//! ```rust
//! use madaq_signature::{SignatureGenerator, ThumbnailRules, parse_submission};
//!
//! let fields = parse_submission("Name: robert\nSurname: morsman\nPhone Number: 06 12345678");
//! let signature = SignatureGenerator::new(ThumbnailRules::default()).generate(&fields);
//!
//! assert_eq!(signature.data.company_email, "r.morsman@madaq.com");
//! assert_eq!(signature.filename, "RobertMorsman_signature.html");
//! ```

mod company;
mod config;
mod delivery;
mod error;
mod normalize;
mod parser;
mod phone;
mod render;
mod signature;
mod thumbnail;
mod types;
mod validate;

pub use company::{COMPANY_DOMAIN, generate_company_email};
pub use config::*;
pub use delivery::*;
pub use error::{ConfigError, DeliveryError, Error, ParseError, Result, RulesError};
pub use normalize::*;
pub use parser::{parse_submission, parse_submission_email};
pub use phone::*;
pub use render::{POSTAL_ADDRESS, WEBSITE_URL, render_signature_html};
pub use signature::{SignatureGenerator, resolve_signature, signature_filename};
pub use thumbnail::*;
pub use types::*;
pub use validate::*;
