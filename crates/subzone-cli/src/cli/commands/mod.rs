//! Command implementations.

pub mod config;
pub mod mail;
pub mod pass;
pub mod submit;
pub mod zone;

use std::path::PathBuf;
use std::sync::Arc;

use subzone::{CredentialKey, FileRecordStore, Publisher, ServiceConfig, ZoneTemplate};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective service configuration
    pub config: ServiceConfig,

    /// Where the configuration was loaded from
    pub config_path: PathBuf,

    /// Shared credential secret
    pub secret: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Get the credential key, returning an error if no secret is set.
    pub fn credential_key(&self) -> anyhow::Result<CredentialKey> {
        let secret = self.secret.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Credential secret required.\n\n\
                 Set it with one of:\n  \
                 1. --secret <SECRET>\n  \
                 2. SUBZONE_SECRET environment variable\n  \
                 3. [auth] secret in {}",
                self.config_path.display()
            )
        })?;
        Ok(CredentialKey::new(secret.as_bytes()))
    }

    /// Open the configured record store for appending, creating it if needed.
    pub async fn open_store(&self) -> anyhow::Result<Arc<FileRecordStore>> {
        let store = FileRecordStore::open(&self.config.store.path).await?;
        Ok(Arc::new(store))
    }

    /// Open the configured record store for replay. It must already exist.
    pub async fn open_store_for_replay(&self) -> anyhow::Result<FileRecordStore> {
        Ok(FileRecordStore::open_existing(&self.config.store.path).await?)
    }

    /// Build the publisher for the configured zone.
    pub async fn publisher(&self) -> anyhow::Result<Publisher> {
        let zone = &self.config.zone;
        let template = match &zone.template {
            Some(path) => ZoneTemplate::load(path, &zone.origin).await?,
            None => ZoneTemplate::builtin(&zone.origin)?,
        };
        Ok(Publisher::new(template, &zone.path, zone.default_serial))
    }
}
