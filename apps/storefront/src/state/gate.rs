//! # Admin Gate
//!
//! Single-factor credential check in front of every mutating command.
//!
//! ```text
//! verify(username, password)
//!      │
//!      ▼
//! admins().find_by_username(username)
//!      │
//!      ├── no row ───────────────────────► false
//!      ▼
//! verifier.matches(row, password)
//!      ├── false ────────────────────────► false
//!      └── true  ────────────────────────► true
//! ```
//!
//! Both failure paths return the same `false`, so callers cannot tell an
//! unknown username from a wrong password. There is no rate limiting or
//! lockout.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use knitcraft_core::CredentialVerifier;
use knitcraft_db::{Database, DbResult};

/// Credential lookup plus comparison.
#[derive(Clone)]
pub struct AdminGate {
    db: Database,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AdminGate {
    pub fn new(db: Database, verifier: Arc<dyn CredentialVerifier>) -> Self {
        AdminGate { db, verifier }
    }

    /// Returns `true` iff an admin row exists for `username` and the
    /// verifier accepts `password` for it.
    pub async fn verify(&self, username: &str, password: &str) -> DbResult<bool> {
        let verified = match self.db.admins().find_by_username(username).await? {
            Some(stored) => self.verifier.matches(&stored, password),
            None => false,
        };

        debug!(username = %username, verified, "Admin credential check");
        Ok(verified)
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}
