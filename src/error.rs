//! Error types for signature generation and delivery

use thiserror::Error;

/// Errors that can occur while parsing a submission
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse the message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Failed to decode message content
    #[error("Failed to decode content: {0}")]
    Decode(String),
}

/// Errors raised by the strict thumbnail rule loader
#[derive(Error, Debug)]
pub enum RulesError {
    /// Rule file could not be read
    #[error("Failed to read thumbnail rules from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not a JSON list of rules
    #[error("Invalid thumbnail rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading or checking configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for our schema
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Required setting is absent
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// Setting is present but unusable
    #[error("Invalid value for {field}: {details}")]
    Invalid { field: &'static str, details: String },
}

/// Errors raised while sending a signature by e-mail
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The outbound message could not be assembled
    #[error("Failed to build email: {0}")]
    Message(String),

    /// The SMTP server rejected our credentials
    #[error("Email authentication failed: {0}")]
    Authentication(String),

    /// Every permitted attempt failed with an SMTP error
    #[error("Email sending failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    /// A failure outside the SMTP conversation
    #[error("Unexpected error while sending email: {0}")]
    Unexpected(String),
}

/// Any error produced by this crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
