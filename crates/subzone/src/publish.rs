//! Zone publishing: replay, serial, compile, write.
//!
//! A run either produces a complete zone or nothing. The output replaces
//! the previous file by rename, so a reader sees the old zone or the new
//! one and never a partial write.

use std::path::{Path, PathBuf};

use subzone_core::Result;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::store::RecordStore;
use crate::zone::{compile, next_serial, ZoneDocument, ZoneTemplate};

/// Compiles the store into a zone for one published zone file.
#[derive(Debug, Clone)]
pub struct Publisher {
    template: ZoneTemplate,
    zone_path: PathBuf,
    default_serial: u32,
}

impl Publisher {
    /// `zone_path` is the currently published zone, read for its serial.
    pub fn new(template: ZoneTemplate, zone_path: impl Into<PathBuf>, default_serial: u32) -> Self {
        Self {
            template,
            zone_path: zone_path.into(),
            default_serial,
        }
    }

    /// Path of the published zone.
    pub fn zone_path(&self) -> &Path {
        &self.zone_path
    }

    /// Replay `store` and build the next zone.
    pub async fn compile_from<S: RecordStore + ?Sized>(&self, store: &S) -> Result<ZoneDocument> {
        let events = store.replay_all().await?;
        let current = self.read_current().await;
        let serial = next_serial(current.as_deref(), self.default_serial)?;

        let document = compile(&events, &self.template, serial);
        info!(
            serial,
            events = events.len(),
            identities = document.identities(),
            records = document.records(),
            "compiled zone"
        );
        Ok(document)
    }

    /// Compile and replace the published zone.
    pub async fn publish<S: RecordStore + ?Sized>(&self, store: &S) -> Result<ZoneDocument> {
        let document = self.compile_from(store).await?;
        write_atomic(&self.zone_path, document.text()).await?;
        info!(path = %self.zone_path.display(), serial = document.serial(), "published zone");
        Ok(document)
    }

    async fn read_current(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.zone_path).await {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.zone_path.display(), error = %e, "cannot read current zone");
                None
            }
        }
    }
}

/// Write `contents` to `path` through a synced sibling file and a rename.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
