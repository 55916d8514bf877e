//! # Session State
//!
//! Admin sessions keyed by opaque token.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   LoggedOut ──── login (credentials verified) ────► LoggedIn            │
//! │       ▲          SessionState::open → token                 │           │
//! │       │                                                     │           │
//! │       └──────────── logout: SessionState::revoke ◄──────────┘           │
//! │                                                                         │
//! │   A failed login issues nothing, so the caller stays LoggedOut.        │
//! │   Tokens never expire on their own.                                    │
//! │   Logging in again replaces that admin's previous token.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutating commands take an [`AdminSession`]. The only way to obtain one is
//! [`SessionState::open`] (after a successful login) or
//! [`SessionState::authorize`] (for a live token), so holding one is the
//! proof of authorization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Authorization context for admin-only operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    token: String,
    username: String,
    logged_in_at: DateTime<Utc>,
}

impl AdminSession {
    /// Opaque bearer token identifying this session.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Admin the session belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// When the login happened.
    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }
}

/// Live admin sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    sessions: Arc<Mutex<HashMap<String, AdminSession>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for a verified admin and returns it.
    ///
    /// Any earlier session of the same admin is revoked, so there is at most
    /// one live token per username.
    ///
    /// Call only after the admin gate accepted the credentials.
    pub fn open(&self, username: &str) -> AdminSession {
        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            logged_in_at: Utc::now(),
        };

        let replaced = self.with_sessions(|sessions| {
            let before = sessions.len();
            sessions.retain(|_, existing| existing.username != username);
            sessions.insert(session.token.clone(), session.clone());
            before + 1 - sessions.len()
        });

        info!(username = %username, replaced, "Admin session opened");
        session
    }

    /// Resolves a token to its live session.
    pub fn authorize(&self, token: &str) -> Option<AdminSession> {
        self.with_sessions(|sessions| sessions.get(token).cloned())
    }

    /// Ends a session. Returns `false` if the token was not live.
    pub fn revoke(&self, token: &str) -> bool {
        let removed = self.with_sessions(|sessions| sessions.remove(token));

        match removed {
            Some(session) => {
                info!(username = %session.username, "Admin session closed");
                true
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub fn active_count(&self) -> usize {
        self.with_sessions(|sessions| sessions.len())
    }

    fn with_sessions<R>(&self, f: impl FnOnce(&mut HashMap<String, AdminSession>) -> R) -> R {
        let mut sessions = self.sessions.lock().expect("Session mutex poisoned");
        f(&mut sessions)
    }
}
