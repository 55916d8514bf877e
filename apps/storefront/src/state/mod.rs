//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Multiple State Types
//! Instead of handlers reaching into one big struct, each concern has its
//! own type and handlers extract only what they need via
//! [`axum::extract::FromRef`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState (router state, cheap to clone)                               │
//! │          │                                                              │
//! │   ┌──────┴────────┬──────────────────┬──────────────────┐              │
//! │   ▼               ▼                  ▼                  ▼              │
//! │  ┌──────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐    │
//! │  │ DbState  │  │  AdminGate   │  │ SessionState │  │ ConfigState │    │
//! │  │          │  │              │  │              │  │             │    │
//! │  │ Database │  │ admin repo + │  │ Arc<Mutex<   │  │ Arc<App     │    │
//! │  │ (pool)   │  │ verifier     │  │  HashMap>>   │  │  Config>    │    │
//! │  └──────────┘  └──────────────┘  └──────────────┘  └─────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState / AdminGate: SqlitePool is internally synchronized          │
//! │  • SessionState: Mutex around the token map                            │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod gate;
mod session;

use std::sync::Arc;

use axum::extract::FromRef;

use knitcraft_core::{CredentialVerifier, PlaintextVerifier};
use knitcraft_db::Database;

use crate::config::AppConfig;

pub use config::ConfigState;
pub use db::DbState;
pub use gate::AdminGate;
pub use session::{AdminSession, SessionState};

/// Router state: every per-concern state in one cloneable bundle.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub gate: AdminGate,
    pub sessions: SessionState,
    pub config: ConfigState,
}

impl AppState {
    /// Builds state around an open database using plain-text credential
    /// comparison.
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self::with_verifier(db, config, Arc::new(PlaintextVerifier))
    }

    /// Builds state with a specific credential verifier.
    pub fn with_verifier(
        db: Database,
        config: AppConfig,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        AppState {
            gate: AdminGate::new(db.clone(), verifier),
            db: DbState::new(db),
            sessions: SessionState::new(),
            config: ConfigState::new(config),
        }
    }
}

impl FromRef<AppState> for DbState {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for AdminGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for ConfigState {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
