//! Configuration loading: TOML file first, environment on top

use crate::error::ConfigError;
use lettre::message::Mailbox;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "madaq-signature.toml";

/// Rule file looked up in the working directory when none is configured
pub const DEFAULT_RULES_FILE: &str = "thumbnails.json";

/// Attempts made when the config does not say otherwise
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const ENV_SMTP_SERVER: &str = "MADAQ_SMTP_SERVER";
pub const ENV_SMTP_PORT: &str = "MADAQ_SMTP_PORT";
pub const ENV_SMTP_SENDER: &str = "MADAQ_SMTP_SENDER";
pub const ENV_SMTP_PASSWORD: &str = "MADAQ_SMTP_PASSWORD";
pub const ENV_SMTP_RECIPIENT: &str = "MADAQ_SMTP_RECIPIENT";

/// A string that never shows up in debug output
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

/// Contents of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub smtp: SmtpSection,
    pub thumbnails: ThumbnailSection,
}

/// `[smtp]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmtpSection {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub sender_email: Option<String>,
    pub sender_password: Option<Secret>,
    pub recipient_email: Option<String>,
    pub max_attempts: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// `[thumbnails]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailSection {
    pub rules_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file; the file must exist
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Attempting to read config file: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Read the explicit file, or the default file if present.
    ///
    /// The environment is not consulted; offline commands only need the
    /// thumbnail section.
    pub fn read(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_path(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// [`AppConfig::read`], then `MADAQ_SMTP_*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`AppConfig::read`], then overrides from `lookup`
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::read(path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Override SMTP settings from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(server) = non_blank(ENV_SMTP_SERVER) {
            self.smtp.server = Some(server);
        }
        if let Some(port) = non_blank(ENV_SMTP_PORT) {
            let port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "smtp.port",
                details: format!("{ENV_SMTP_PORT}={port} is not a port number"),
            })?;
            self.smtp.port = Some(port);
        }
        if let Some(sender) = non_blank(ENV_SMTP_SENDER) {
            self.smtp.sender_email = Some(sender);
        }
        if let Some(password) = non_blank(ENV_SMTP_PASSWORD) {
            self.smtp.sender_password = Some(Secret::new(password));
        }
        if let Some(recipient) = non_blank(ENV_SMTP_RECIPIENT) {
            self.smtp.recipient_email = Some(recipient);
        }
        Ok(())
    }

    /// Rule file to load: configured path, else the default name
    #[must_use]
    pub fn rules_file(&self) -> PathBuf {
        self.thumbnails
            .rules_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_FILE))
    }
}

/// Complete, checked SMTP settings
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub sender: Mailbox,
    pub password: Secret,
    pub recipient: Mailbox,
    pub max_attempts: u32,
    pub timeout: Option<Duration>,
}

impl SmtpSettings {
    /// Check that every SMTP setting is present and usable
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let smtp = &config.smtp;

        let server = required(smtp.server.as_deref(), "smtp.server")?.to_string();
        let port = smtp.port.ok_or(ConfigError::Missing("smtp.port"))?;
        let sender_email = required(smtp.sender_email.as_deref(), "smtp.sender_email")?;
        let password = smtp
            .sender_password
            .clone()
            .filter(|p| !p.expose().is_empty())
            .ok_or(ConfigError::Missing("smtp.sender_password"))?;
        let recipient_email = required(smtp.recipient_email.as_deref(), "smtp.recipient_email")?;

        if port == 0 {
            return Err(ConfigError::Invalid {
                field: "smtp.port",
                details: "port 0 is not usable".to_string(),
            });
        }

        let sender = parse_mailbox(sender_email, "smtp.sender_email")?;
        let recipient = parse_mailbox(recipient_email, "smtp.recipient_email")?;

        let max_attempts = smtp.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "smtp.max_attempts",
                details: "at least one attempt is required".to_string(),
            });
        }
        if max_attempts > 10 {
            warn!("smtp.max_attempts is {max_attempts}; every attempt opens a new connection");
        }

        Ok(Self {
            server,
            port,
            sender,
            password,
            recipient,
            max_attempts,
            timeout: smtp.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(field))
}

fn parse_mailbox(value: &str, field: &'static str) -> Result<Mailbox, ConfigError> {
    value.parse().map_err(|e| ConfigError::Invalid {
        field,
        details: format!("'{value}': {e}"),
    })
}
