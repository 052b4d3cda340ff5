//! Syntax rules for submitted hostnames and identities.
//!
//! A hostname is at most 255 characters. One trailing dot is allowed (the
//! absolute form); the rest is split into labels. Every label is 1-63
//! ASCII letters, digits or hyphens and may not begin or end with a hyphen.

use crate::{Result, SubzoneError};

/// Maximum length of a full hostname.
pub const MAX_HOSTNAME_LEN: usize = 255;

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum number of hosts per submission.
pub const MAX_HOSTS: usize = 20;

/// Check a single DNS label.
#[must_use]
pub fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
        return false;
    }
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Check a candidate hostname, with or without its trailing dot.
#[must_use]
pub fn is_valid_hostname(candidate: &str) -> bool {
    if candidate.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    let name = candidate.strip_suffix('.').unwrap_or(candidate);
    !name.is_empty() && name.split('.').all(is_valid_label)
}

/// Canonical form of a submitted identity.
///
/// Identities become a DNS label, and labels compare case-insensitively, so
/// `Alice` and `alice` name the same block of aliases.
#[must_use]
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Identities become a label in the published zone, so they follow the
/// label rules.
pub fn validate_identity(identity: &str) -> Result<()> {
    if is_valid_label(identity) {
        Ok(())
    } else {
        Err(SubzoneError::InvalidIdentity(identity.to_string()))
    }
}

/// Split a comma-separated host list, trimming whitespace around entries.
#[must_use]
pub fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|h| h.trim().to_string()).collect()
}

/// Validate a host list and return it with trailing dots stripped.
///
/// The size bound is checked before any hostname is looked at.
pub fn validate_hosts<S: AsRef<str>>(hosts: &[S]) -> Result<Vec<String>> {
    if hosts.is_empty() {
        return Err(SubzoneError::NoHosts);
    }
    if hosts.len() > MAX_HOSTS {
        return Err(SubzoneError::TooManyHosts {
            count: hosts.len(),
            max: MAX_HOSTS,
        });
    }

    hosts
        .iter()
        .map(|h| {
            let h = h.as_ref();
            if is_valid_hostname(h) {
                Ok(h.strip_suffix('.').unwrap_or(h).to_string())
            } else {
                Err(SubzoneError::InvalidHostname(h.to_string()))
            }
        })
        .collect()
}
