//! Sending a generated signature over SMTP
//!
//! The adapter builds a `multipart/mixed` message (plain-text summary plus
//! the HTML signature as an attachment) and hands it to a [`MailTransport`].
//!
//! # Retry policy
//!
//! - **Authentication errors**: reported at once, never retried
//! - **SMTP errors**: retried up to [`RetryPolicy::max_attempts`]
//! - **Anything else** (connection, TLS, timeouts): reported at once
//!
//! Progress is reported to a [`DeliveryObserver`] so callers decide how to
//! surface it.

use crate::company::generate_company_email;
use crate::config::{DEFAULT_MAX_ATTEMPTS, SmtpSettings};
use crate::error::DeliveryError;
use crate::phone::normalize_phone;
use crate::types::{GeneratedSignature, SubmissionFields};
use chrono::{DateTime, Local};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{error, info, warn};

/// SMTP response codes that mean the login was refused
const AUTH_FAILURE_CODES: [&str; 3] = ["530", "534", "535"];

/// Port that expects TLS from the first byte instead of STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

/// A single failed send, classified for the retry policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Something that can put a message on the wire
pub trait MailTransport {
    fn send(&self, message: &Message) -> Result<(), TransportError>;
}

/// Blocking lettre SMTP transport
pub struct LettreTransport {
    inner: SmtpTransport,
}

impl LettreTransport {
    /// Connect settings to a relay: implicit TLS on 465, STARTTLS elsewhere
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, DeliveryError> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            SmtpTransport::relay(&settings.server)
        } else {
            SmtpTransport::starttls_relay(&settings.server)
        }
        .map_err(|e| DeliveryError::Unexpected(e.to_string()))?;

        let credentials = Credentials::new(
            settings.sender.email.to_string(),
            settings.password.expose().to_string(),
        );

        let inner = builder
            .port(settings.port)
            .credentials(credentials)
            .timeout(settings.timeout)
            .build();

        Ok(Self { inner })
    }
}

impl MailTransport for LettreTransport {
    fn send(&self, message: &Message) -> Result<(), TransportError> {
        self.inner
            .send(message)
            .map(|_| ())
            .map_err(|e| classify_smtp_error(&e))
    }
}

/// Sort a lettre error into the three retry classes
#[must_use]
pub fn classify_smtp_error(err: &lettre::transport::smtp::Error) -> TransportError {
    let text = err.to_string();
    let is_auth_code = err
        .status()
        .is_some_and(|code| AUTH_FAILURE_CODES.contains(&code.to_string().as_str()));

    if is_auth_code || text.to_lowercase().contains("authentication") {
        TransportError::Authentication(text)
    } else if err.is_transient() || err.is_permanent() || err.is_response() || err.is_client() {
        TransportError::Smtp(text)
    } else {
        TransportError::Unexpected(text)
    }
}

/// What to do after a failed attempt
#[derive(Debug)]
pub enum RetryDecision {
    Retry,
    GiveUp(DeliveryError),
}

/// Bounded retry without backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Decide after `attempt` (1-based) failed with `err`
    #[must_use]
    pub fn decide(&self, attempt: u32, err: &TransportError) -> RetryDecision {
        match err {
            TransportError::Authentication(msg) => {
                RetryDecision::GiveUp(DeliveryError::Authentication(msg.clone()))
            }
            TransportError::Unexpected(msg) => {
                RetryDecision::GiveUp(DeliveryError::Unexpected(msg.clone()))
            }
            TransportError::Smtp(msg) if attempt >= self.max_attempts.max(1) => {
                RetryDecision::GiveUp(DeliveryError::RetriesExhausted {
                    attempts: attempt,
                    last: msg.clone(),
                })
            }
            TransportError::Smtp(_) => RetryDecision::Retry,
        }
    }
}

/// Receives progress while a message is being sent
pub trait DeliveryObserver {
    fn attempt_started(&self, _attempt: u32, _max_attempts: u32) {}

    fn retrying(&self, _attempt: u32, _error: &TransportError) {}

    fn delivered(&self, _attempts: u32) {}

    fn failed(&self, _error: &DeliveryError) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DeliveryObserver for NoopObserver {}

/// Plain-text body sent alongside the signature
#[must_use]
pub fn submission_summary(
    fields: &SubmissionFields,
    recipient: &str,
    timestamp: &DateTime<Local>,
) -> String {
    let timestamp = timestamp.format("%Y-%m-%d %H:%M:%S");
    let normalized_phone = normalize_phone(&fields.phone);
    let company_email = generate_company_email(&fields.name, &fields.surname);
    let SubmissionFields {
        name,
        surname,
        email,
        phone,
        job_title,
        favourite_bonbon,
    } = fields;

    format!(
        "New Employee Contact Form Submission

Submission Details:
==================
Date & Time: {timestamp}
Personal Email: {email}

Employee Information:
====================
Full Name: {name} {surname}
Personal Email: {email}
Phone Number: {phone} (normalized: {normalized_phone})
Job Title: {job_title}
Favourite Bonbon: {favourite_bonbon}

Generated Company Email: {company_email}

Next Steps for {recipient}:
==================================
1. Create company email account: {company_email}
2. Set up employee access and accounts
3. Send signature file to employee (attached HTML file is ready to use)
4. Add to company directory

The attached HTML signature file contains the correctly formatted
company email address and is ready for use.

Best regards,
Madaq Contact Form System
"
    )
}

/// Assemble the outbound message
pub fn build_message(
    settings: &SmtpSettings,
    fields: &SubmissionFields,
    signature: &GeneratedSignature,
    timestamp: &DateTime<Local>,
) -> Result<Message, DeliveryError> {
    let recipient = settings.recipient.email.to_string();
    let subject = format!(
        "New Employee Contact Info - {} {}",
        fields.name.trim(),
        fields.surname.trim()
    );

    let mut builder = Message::builder()
        .from(settings.sender.clone())
        .to(settings.recipient.clone())
        .subject(subject);

    match fields.email.trim().parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => warn!("Not setting Reply-To for '{}': {e}", fields.email),
    }

    let attachment = Attachment::new(signature.filename.clone())
        .body(signature.html.clone(), ContentType::TEXT_HTML);

    builder
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(submission_summary(
                    fields, &recipient, timestamp,
                )))
                .singlepart(attachment),
        )
        .map_err(|e| DeliveryError::Message(e.to_string()))
}

/// Sends signatures to the configured recipient
pub struct SmtpDelivery<T: MailTransport = LettreTransport> {
    settings: SmtpSettings,
    transport: T,
    policy: RetryPolicy,
}

impl SmtpDelivery<LettreTransport> {
    /// Deliver through a real SMTP relay
    pub fn connect(settings: SmtpSettings) -> Result<Self, DeliveryError> {
        let transport = LettreTransport::from_settings(&settings)?;
        Ok(Self::with_transport(settings, transport))
    }
}

impl<T: MailTransport> SmtpDelivery<T> {
    /// Deliver through any transport; attempts come from the settings
    pub fn with_transport(settings: SmtpSettings, transport: T) -> Self {
        let policy = RetryPolicy::new(settings.max_attempts);
        Self {
            settings,
            transport,
            policy,
        }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Build and send the message for a submission
    pub fn send_signature(
        &self,
        fields: &SubmissionFields,
        signature: &GeneratedSignature,
        observer: &dyn DeliveryObserver,
    ) -> Result<(), DeliveryError> {
        let message = match build_message(&self.settings, fields, signature, &Local::now()) {
            Ok(message) => message,
            Err(e) => {
                error!("{e}");
                observer.failed(&e);
                return Err(e);
            }
        };
        self.deliver(&message, observer)
    }

    /// Send a prepared message under the retry policy
    pub fn deliver(
        &self,
        message: &Message,
        observer: &dyn DeliveryObserver,
    ) -> Result<(), DeliveryError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            info!("Email sending attempt {attempt}");
            observer.attempt_started(attempt, max_attempts);

            let err = match self.transport.send(message) {
                Ok(()) => {
                    info!(
                        recipient = %self.settings.recipient,
                        "Email sent successfully"
                    );
                    observer.delivered(attempt);
                    return Ok(());
                }
                Err(err) => err,
            };

            match self.policy.decide(attempt, &err) {
                RetryDecision::Retry => {
                    warn!(attempt, error = %err, "Email attempt failed, retrying");
                    observer.retrying(attempt, &err);
                }
                RetryDecision::GiveUp(failure) => {
                    error!(attempt, error = %err, "Email sending failed");
                    observer.failed(&failure);
                    return Err(failure);
                }
            }
        }
    }
}
