//! Per-identity credentials derived from a shared secret.
//!
//! The credential for an identity is `base64url(HMAC-SHA256(secret, identity))`
//! without padding, computed over the lowercased identity. Nothing is stored:
//! the server re-derives and compares.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::hmac;
use subzone_core::validate::normalize_identity;
use subzone_core::{Result, SubzoneError};

/// Keyed-hash credential issuer and verifier.
pub struct CredentialKey {
    key: hmac::Key,
}

impl std::fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialKey").finish_non_exhaustive()
    }
}

impl CredentialKey {
    /// Build a key from the shared secret.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Credential to hand out for `identity`.
    #[must_use]
    pub fn derive(&self, identity: &str) -> String {
        let tag = hmac::sign(&self.key, normalize_identity(identity).as_bytes());
        URL_SAFE_NO_PAD.encode(tag.as_ref())
    }

    /// Check a presented credential in constant time.
    pub fn verify(&self, identity: &str, presented: &str) -> Result<()> {
        let tag = URL_SAFE_NO_PAD
            .decode(presented.trim())
            .map_err(|_| SubzoneError::Unauthorized)?;
        hmac::verify(&self.key, normalize_identity(identity).as_bytes(), &tag)
            .map_err(|_| SubzoneError::Unauthorized)
    }
}
