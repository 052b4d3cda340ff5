use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One accepted hostname registration.
///
/// Each event is stored as a single JSON line in the record store. Older
/// logs used `netid` and `time` as field names; both are still accepted
/// when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    /// Subdomain label the hosts are published under
    #[serde(alias = "netid")]
    pub identity: String,

    /// Hostnames in submission order, without trailing dot
    pub hosts: Vec<String>,

    /// When the submission was accepted (informational only)
    #[serde(alias = "time")]
    pub timestamp: DateTime<Utc>,
}

impl SubmissionEvent {
    /// Create an event stamped with the current time (whole seconds).
    #[must_use]
    pub fn new(identity: impl Into<String>, hosts: Vec<String>) -> Self {
        Self::at(identity, hosts, Utc::now().trunc_subsecs(0))
    }

    /// Create an event with an explicit timestamp.
    #[must_use]
    pub fn at(identity: impl Into<String>, hosts: Vec<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity: identity.into(),
            hosts,
            timestamp,
        }
    }

    /// Encode as a single log line, without the trailing newline.
    pub fn to_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode one log line.
    pub fn from_line(line: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Raw registration input as received from a front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Claimed identity
    pub identity: String,

    /// Credential presented for the identity
    pub credential: String,

    /// Comma-separated hostnames
    pub hosts: String,
}

/// Acknowledgement returned after a submission was persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// The event exactly as appended to the store
    pub event: SubmissionEvent,

    /// Fully qualified alias names, index-aligned with `event.hosts`
    pub aliases: Vec<String>,
}

impl Receipt {
    /// Build the receipt for an event published under `origin`.
    #[must_use]
    pub fn new(event: SubmissionEvent, origin: &str) -> Self {
        let origin = origin.trim_end_matches('.');
        let aliases = (0..event.hosts.len())
            .map(|idx| format!("server{idx}.{}.{origin}", event.identity))
            .collect();
        Self { event, aliases }
    }

    /// Pairs of `(alias, target host)`.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(String::as_str)
            .zip(self.event.hosts.iter().map(String::as_str))
    }
}
