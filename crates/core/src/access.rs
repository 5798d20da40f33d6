//! Capability check guarding mutating catalog operations.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Decides whether a request may perform a gated mutation (update/delete).
///
/// Handlers receive an implementation through application state, so the
/// shared-password scheme can be swapped without touching the workflows.
pub trait MutationGate: Send + Sync {
    fn has_mutation_capability(&self, supplied: Option<&str>) -> bool;
}

/// Grants the capability to anyone presenting the single shared secret.
pub struct SharedSecretGate {
    digest: [u8; 32],
}

impl SharedSecretGate {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }
}

impl std::fmt::Debug for SharedSecretGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretGate").finish_non_exhaustive()
    }
}

impl MutationGate for SharedSecretGate {
    fn has_mutation_capability(&self, supplied: Option<&str>) -> bool {
        match supplied {
            Some(password) if !password.is_empty() => {
                // Fixed-length digests, compared in constant time.
                let candidate: [u8; 32] = Sha256::digest(password.as_bytes()).into();
                candidate[..].ct_eq(&self.digest[..]).into()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_passes() {
        let gate = SharedSecretGate::new("hunter2");
        assert!(gate.has_mutation_capability(Some("hunter2")));
    }

    #[test]
    fn wrong_secret_fails() {
        let gate = SharedSecretGate::new("hunter2");
        assert!(!gate.has_mutation_capability(Some("hunter3")));
        assert!(!gate.has_mutation_capability(Some("hunter2 ")));
    }

    #[test]
    fn absent_or_empty_password_never_passes() {
        let gate = SharedSecretGate::new("");
        assert!(!gate.has_mutation_capability(None));
        assert!(!gate.has_mutation_capability(Some("")));
    }

    #[test]
    fn secret_sharing_a_prefix_fails() {
        let gate = SharedSecretGate::new("hunter2");
        assert!(!gate.has_mutation_capability(Some("hunter")));
        assert!(!gate.has_mutation_capability(Some("hunter22")));
    }

    #[test]
    fn debug_does_not_leak_digest() {
        let gate = SharedSecretGate::new("hunter2");
        assert_eq!(format!("{gate:?}"), "SharedSecretGate { .. }");
    }
}
