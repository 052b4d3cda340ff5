use async_trait::async_trait;
use subzone_core::{Result, SubmissionEvent};
use tokio::sync::Mutex;

use super::{decode_lines, RecordStore};

/// In-memory record store.
///
/// Events are kept in their encoded line form so replay exercises the same
/// decoding path as the file store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    lines: Mutex<Vec<String>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines appended so far.
    pub async fn len(&self) -> usize {
        self.lines.lock().await.len()
    }

    /// Whether nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.lines.lock().await.is_empty()
    }

    /// Push a raw line, bypassing encoding.
    pub async fn push_raw(&self, line: impl Into<String>) {
        self.lines.lock().await.push(line.into());
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, event: &SubmissionEvent) -> Result<()> {
        let line = event.to_line()?;
        self.lines.lock().await.push(line);
        Ok(())
    }

    async fn replay_all(&self) -> Result<Vec<SubmissionEvent>> {
        let lines = self.lines.lock().await;
        decode_lines(lines.iter().map(String::as_str))
    }
}
