//! # Credential Verification
//!
//! The comparison step of the admin login, separated from the lookup.
//!
//! ```text
//! login(username, password)
//!      │
//!      ▼
//! AdminRepository::find_by_username   ← knitcraft-db (I/O)
//!      │
//!      ├── None ─────────────────────────────► denied
//!      │
//!      ▼
//! CredentialVerifier::matches         ← THIS MODULE (pure)
//!      │
//!      ├── false ────────────────────────────► denied
//!      └── true  ────────────────────────────► session issued
//! ```
//!
//! Passwords are currently stored in plain text. A hashing scheme only needs
//! a new [`CredentialVerifier`] implementation; call sites take
//! `&dyn CredentialVerifier` and stay unchanged.

use crate::types::AdminCredential;

/// Decides whether a supplied password matches a stored credential.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` iff `supplied_password` matches `stored`.
    fn matches(&self, stored: &AdminCredential, supplied_password: &str) -> bool;
}

/// Exact, case-sensitive string comparison against the stored password.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn matches(&self, stored: &AdminCredential, supplied_password: &str) -> bool {
        stored.password == supplied_password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_exact_match() {
        let stored = AdminCredential::new("admin", "admin123");
        let verifier = PlaintextVerifier;

        assert!(verifier.matches(&stored, "admin123"));
        assert!(!verifier.matches(&stored, "ADMIN123"));
        assert!(!verifier.matches(&stored, "admin123 "));
        assert!(!verifier.matches(&stored, ""));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let verifier: Box<dyn CredentialVerifier> = Box::new(PlaintextVerifier);
        assert!(verifier.matches(&AdminCredential::new("a", "b"), "b"));
    }
}
