use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use subzone_core::{Result, SubmissionEvent, SubzoneError};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{decode_line, RecordStore};

/// Record store backed by a newline-delimited JSON file.
///
/// The append handle lives behind a mutex; each append writes one full
/// line, flushes and syncs before the lock is released. Replay uses its own
/// read handle. A store opened with [`FileRecordStore::open_existing`] has
/// no append handle and rejects appends.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    file: Option<Mutex<File>>,
}

impl FileRecordStore {
    /// Open (or create) the log at `path` for appending.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SubzoneError::storage(&path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| SubzoneError::storage(&path, e))?;

        debug!(path = %path.display(), "opened record store");

        Ok(Self {
            path,
            file: Some(Mutex::new(file)),
        })
    }

    /// Open an existing log for replay only.
    ///
    /// A missing file is a storage error; nothing is created.
    pub async fn open_existing(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|e| SubzoneError::storage(&path, e))?;
        if !meta.is_file() {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "not a regular file");
            return Err(SubzoneError::storage(&path, err));
        }

        debug!(path = %path.display(), "opened record store read-only");
        Ok(Self { path, file: None })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync the append handle, then release it.
    pub async fn close(self) -> Result<()> {
        let Some(file) = self.file else {
            return Ok(());
        };
        let mut file = file.into_inner();
        file.flush()
            .await
            .map_err(|e| SubzoneError::storage(&self.path, e))?;
        file.sync_all()
            .await
            .map_err(|e| SubzoneError::storage(&self.path, e))?;
        debug!(path = %self.path.display(), "closed record store");
        Ok(())
    }
}

async fn write_line(file: &mut File, line: &[u8]) -> io::Result<()> {
    file.write_all(line).await?;
    file.flush().await?;
    file.sync_data().await
}

/// Cut the log back to `len` bytes, dropping a partially written line.
async fn truncate_to(file: &mut File, len: u64, path: &Path) {
    if let Err(e) = file.set_len(len).await {
        warn!(path = %path.display(), len, error = %e, "cannot roll back partial append");
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn append(&self, event: &SubmissionEvent) -> Result<()> {
        let Some(handle) = &self.file else {
            let err = io::Error::new(io::ErrorKind::PermissionDenied, "opened read-only");
            return Err(SubzoneError::storage(&self.path, err));
        };

        let mut line = event.to_line()?;
        line.push('\n');

        let mut file = handle.lock().await;
        let len = file
            .metadata()
            .await
            .map_err(|e| SubzoneError::storage(&self.path, e))?
            .len();
        if let Err(e) = write_line(&mut file, line.as_bytes()).await {
            truncate_to(&mut file, len, &self.path).await;
            return Err(SubzoneError::storage(&self.path, e));
        }
        drop(file);

        debug!(
            identity = %event.identity,
            hosts = event.hosts.len(),
            "appended submission"
        );
        Ok(())
    }

    async fn replay_all(&self) -> Result<Vec<SubmissionEvent>> {
        let file = File::open(&self.path)
            .await
            .map_err(|e| SubzoneError::storage(&self.path, e))?;
        let mut lines = BufReader::new(file).lines();

        let mut events = Vec::new();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| SubzoneError::storage(&self.path, e))?
        {
            events.push(decode_line(events.len() + 1, &line)?);
        }

        debug!(path = %self.path.display(), events = events.len(), "replayed record store");
        Ok(events)
    }
}
