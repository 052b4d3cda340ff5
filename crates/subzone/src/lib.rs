//! Per-identity hostname registration and DNS zone publishing.
//!
//! Users register up to twenty hostnames under their own subdomain. Each
//! accepted submission is appended to a log; a periodic job replays the log
//! and regenerates the zone file an external nameserver serves.
//!
//! # Data Flow
//!
//! ```text
//! Submission
//!   -> credential check     (credential)
//!   -> hostname validation  (subzone_core::validate)
//!   -> append               (store)
//!
//! Periodic publish
//!   replay store -> read current zone -> next serial
//!   -> compile (latest hosts per identity, sorted)
//!   -> atomic write of the zone file   (publish)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use subzone::{CredentialKey, FileRecordStore, Publisher, Registrar, Submission, ZoneTemplate};
//!
//! # async fn example() -> subzone::Result<()> {
//! let store = Arc::new(FileRecordStore::open("/var/lib/subzone/records.jsonl").await?);
//! let key = CredentialKey::new(b"secret");
//! let registrar = Registrar::new(Arc::clone(&store), key, "hosts.example.org.");
//!
//! let receipt = registrar
//!     .submit(&Submission {
//!         identity: "abc123".into(),
//!         credential: CredentialKey::new(b"secret").derive("abc123"),
//!         hosts: "node1.example.net,node2.example.net".into(),
//!     })
//!     .await?;
//!
//! let template = ZoneTemplate::builtin("hosts.example.org.")?;
//! let publisher = Publisher::new(template, "/etc/nsd/subzone.zone", subzone::zone::DEFAULT_SERIAL);
//! publisher.publish(store.as_ref()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credential;
pub mod notify;
pub mod publish;
pub mod registrar;
pub mod store;
pub mod zone;

// Re-export core types
pub use subzone_core::*;

pub use config::ServiceConfig;
pub use credential::CredentialKey;
pub use publish::Publisher;
pub use registrar::Registrar;
pub use store::{FileRecordStore, MemoryRecordStore, RecordStore};
pub use zone::{ZoneDocument, ZoneTemplate};

// Re-export runtime for convenience
pub use tokio;
