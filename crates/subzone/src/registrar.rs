//! Submission pipeline: authorize, validate, record.
//!
//! Nothing reaches the store unless the credential matches and every host
//! passes validation. A failed append is reported to the caller; the
//! submission is never acknowledged without a durable record.

use std::sync::Arc;

use subzone_core::validate::{
    normalize_identity, parse_host_list, validate_hosts, validate_identity,
};
use subzone_core::{Receipt, Result, Submission, SubmissionEvent};
use tracing::{info, warn};

use crate::credential::CredentialKey;
use crate::store::RecordStore;

/// Accepts submissions on behalf of a front end.
pub struct Registrar<S: RecordStore> {
    store: Arc<S>,
    key: CredentialKey,
    origin: String,
}

impl<S: RecordStore> Registrar<S> {
    /// Create a registrar appending to `store`.
    pub fn new(store: Arc<S>, key: CredentialKey, origin: impl Into<String>) -> Self {
        Self {
            store,
            key,
            origin: origin.into(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Process one submission.
    pub async fn submit(&self, submission: &Submission) -> Result<Receipt> {
        let identity = normalize_identity(&submission.identity);

        if let Err(e) = self.key.verify(&identity, &submission.credential) {
            warn!(%identity, "credential rejected");
            return Err(e);
        }

        validate_identity(&identity)?;
        let hosts = validate_hosts(&parse_host_list(&submission.hosts)).map_err(|e| {
            warn!(%identity, error = %e, "submission rejected");
            e
        })?;

        let event = SubmissionEvent::new(identity, hosts);
        self.store.append(&event).await?;

        info!(identity = %event.identity, hosts = event.hosts.len(), "registered hosts");
        Ok(Receipt::new(event, &self.origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use subzone_core::SubzoneError;

    const SECRET: &[u8] = b"s3cret";

    fn registrar() -> Registrar<MemoryRecordStore> {
        Registrar::new(
            Arc::new(MemoryRecordStore::new()),
            CredentialKey::new(SECRET),
            "hosts.example.org.",
        )
    }

    fn submission(identity: &str, hosts: &str) -> Submission {
        Submission {
            identity: identity.into(),
            credential: CredentialKey::new(SECRET).derive(identity),
            hosts: hosts.into(),
        }
    }

    #[tokio::test]
    async fn test_accepted_submission_is_recorded() {
        let registrar = registrar();
        let receipt = registrar
            .submit(&submission("abc123", "a.example.com, b.example.com."))
            .await
            .unwrap();

        assert_eq!(receipt.event.hosts, vec!["a.example.com", "b.example.com"]);
        assert_eq!(
            receipt.aliases,
            vec![
                "server0.abc123.hosts.example.org",
                "server1.abc123.hosts.example.org"
            ]
        );

        let replayed = registrar.store().replay_all().await.unwrap();
        assert_eq!(replayed, vec![receipt.event]);
    }

    #[tokio::test]
    async fn test_too_many_hosts_never_reaches_store() {
        let registrar = registrar();
        let hosts: Vec<String> = (0..21).map(|i| format!("h{i}.example.com")).collect();

        let err = registrar
            .submit(&submission("abc123", &hosts.join(",")))
            .await
            .unwrap_err();

        assert!(matches!(err, SubzoneError::TooManyHosts { count: 21, .. }));
        assert!(registrar.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_invalid_host_never_reaches_store() {
        let registrar = registrar();
        let err = registrar
            .submit(&submission("abc123", "ok.example.com,bad_host"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(registrar.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_wrong_credential_rejected() {
        let registrar = registrar();
        let mut bad = submission("abc123", "a.example.com");
        bad.credential = CredentialKey::new(SECRET).derive("def456");

        let err = registrar.submit(&bad).await.unwrap_err();
        assert!(matches!(err, SubzoneError::Unauthorized));
        assert!(registrar.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_identity_is_lowercased() {
        let registrar = registrar();
        let receipt = registrar
            .submit(&submission(" AbC123 ", "a.example.com"))
            .await
            .unwrap();
        assert_eq!(receipt.event.identity, "abc123");
        assert_eq!(receipt.aliases, vec!["server0.abc123.hosts.example.org"]);
    }

    #[tokio::test]
    async fn test_empty_identity_rejected() {
        let registrar = registrar();
        let err = registrar
            .submit(&submission("", "a.example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubzoneError::InvalidIdentity(_)));
        assert!(registrar.store().is_empty().await);
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl RecordStore for FailingStore {
        async fn append(&self, _event: &SubmissionEvent) -> Result<()> {
            Err(SubzoneError::storage(
                "/full/disk/records.jsonl",
                std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"),
            ))
        }

        async fn replay_all(&self) -> Result<Vec<SubmissionEvent>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let registrar = Registrar::new(
            Arc::new(FailingStore),
            CredentialKey::new(SECRET),
            "hosts.example.org.",
        );
        let err = registrar
            .submit(&submission("abc123", "a.example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubzoneError::Storage { .. }));
    }
}
