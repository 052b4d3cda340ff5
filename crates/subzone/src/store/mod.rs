//! Append-only record store for accepted submissions.
//!
//! The store is the only shared mutable resource in the pipeline. Appends
//! are serialized so that lines never interleave, and replay returns every
//! event in append order. A line that does not decode fails the replay.

mod file;
mod memory;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use async_trait::async_trait;
use subzone_core::{Result, SubmissionEvent, SubzoneError};

/// Durable, ordered log of submission events.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one event. Returns only after the line is on stable storage.
    async fn append(&self, event: &SubmissionEvent) -> Result<()>;

    /// Read every event from the beginning of the log.
    async fn replay_all(&self) -> Result<Vec<SubmissionEvent>>;
}

/// Decode a whole log body, one event per line.
///
/// Line numbers in errors are 1-indexed.
pub(crate) fn decode_lines<'a, I>(lines: I) -> Result<Vec<SubmissionEvent>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| decode_line(idx + 1, line))
        .collect()
}

pub(crate) fn decode_line(line_no: usize, line: &str) -> Result<SubmissionEvent> {
    SubmissionEvent::from_line(line.trim()).map_err(|e| SubzoneError::CorruptLog {
        line: line_no,
        reason: e.to_string(),
    })
}
