use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for subzone operations
pub type Result<T> = std::result::Result<T, SubzoneError>;

/// Errors that can occur while registering hosts or publishing a zone
#[derive(Error, Debug)]
pub enum SubzoneError {
    /// A submitted hostname fails the label syntax rules
    #[error("{0:?} is not a valid hostname")]
    InvalidHostname(String),

    /// The identity cannot be used as a DNS label
    #[error("{0:?} is not a valid identity")]
    InvalidIdentity(String),

    /// The submission carries more hosts than allowed
    #[error("too many hosts: {count} submitted, at most {max} allowed")]
    TooManyHosts {
        /// Number of hosts submitted
        count: usize,
        /// Upper bound per submission
        max: usize,
    },

    /// The submission carries no hosts at all
    #[error("at least one host is required")]
    NoHosts,

    /// Credential does not match the identity
    #[error("wrong identity/credential combination")]
    Unauthorized,

    /// The record store could not be opened, written or read
    #[error("record store {}: {source}", path.display())]
    Storage {
        /// Path of the backing file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A line in the record store does not parse
    #[error("corrupt record store at line {line}: {reason}")]
    CorruptLog {
        /// 1-indexed line number
        line: usize,
        /// Parser message
        reason: String,
    },

    /// The previous serial is already the largest representable value
    #[error("zone serial {0} cannot be incremented")]
    SerialExhausted(u32),

    /// Zone template is malformed
    #[error("template error: {0}")]
    Template(String),

    /// Configuration is invalid or missing required fields
    #[error("config error: {0}")]
    Config(String),

    /// Sending the credential notification failed
    #[error("notification failed: {0}")]
    Notify(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SubzoneError {
    /// Wrap an I/O failure on the record store file.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error was caused by bad submitter input
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidHostname(_)
                | Self::InvalidIdentity(_)
                | Self::TooManyHosts { .. }
                | Self::NoHosts
        )
    }

    /// Returns true if the error must abort a zone compilation
    #[must_use]
    pub const fn is_fatal_to_compilation(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. }
                | Self::CorruptLog { .. }
                | Self::SerialExhausted(_)
                | Self::Template(_)
        )
    }
}
