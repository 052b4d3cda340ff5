//! Service configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use subzone_core::validate::is_valid_hostname;
use subzone_core::{Result, SubzoneError};

use crate::zone::DEFAULT_SERIAL;

/// Configuration for registering hosts and publishing the zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Record store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Zone being published.
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Credential settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Credential mail settings.
    #[serde(default)]
    pub mail: MailConfig,

    /// Log output settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where submissions are recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Append-only log file (default: /var/lib/subzone/records.jsonl).
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// Published zone settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Zone origin the aliases live under (default: hosts.example.org.).
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Zone file read by the nameserver (default: /etc/nsd/subzone.zone).
    #[serde(default = "default_zone_path")]
    pub path: PathBuf,

    /// Template file; the built-in template is used when unset.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Serial used when the current zone has none.
    #[serde(default = "default_serial")]
    pub default_serial: u32,
}

/// Shared secret for credential derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret. May also come from the environment.
    #[serde(default)]
    pub secret: Option<String>,
}

/// Outbound mail for handing out credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// MTA program, invoked with the recipient as its only argument.
    #[serde(default = "default_mail_command")]
    pub command: String,

    /// Domain appended to identities to form the recipient address.
    #[serde(default = "default_mail_domain")]
    pub domain: String,

    /// From header.
    #[serde(default = "default_mail_from")]
    pub from: String,

    /// Link included in the message body.
    #[serde(default)]
    pub info_url: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            path: default_zone_path(),
            template: None,
            default_serial: default_serial(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            command: default_mail_command(),
            domain: default_mail_domain(),
            from: default_mail_from(),
            info_url: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServiceConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SubzoneError::Config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SubzoneError::Config(e.to_string()))
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_hostname(&self.zone.origin) {
            return Err(SubzoneError::Config(format!(
                "zone.origin {:?} is not a valid domain name",
                self.zone.origin
            )));
        }
        if !matches!(self.log.format.as_str(), "text" | "json") {
            return Err(SubzoneError::Config(format!(
                "log.format must be \"text\" or \"json\", got {:?}",
                self.log.format
            )));
        }
        if self.mail.command.trim().is_empty() {
            return Err(SubzoneError::Config("mail.command is empty".into()));
        }
        Ok(())
    }
}

// Default value functions for serde.
fn default_store_path() -> PathBuf {
    PathBuf::from("/var/lib/subzone/records.jsonl")
}

fn default_origin() -> String {
    String::from("hosts.example.org.")
}

fn default_zone_path() -> PathBuf {
    PathBuf::from("/etc/nsd/subzone.zone")
}

const fn default_serial() -> u32 {
    DEFAULT_SERIAL
}

fn default_mail_command() -> String {
    String::from("msmtpq")
}

fn default_mail_domain() -> String {
    String::from("example.org")
}

fn default_mail_from() -> String {
    String::from("Hostmaster <hostmaster@example.org>")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("text")
}
