//! # Commands Module
//!
//! Every operation the browser can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Storefront listing, image bytes, admin CRUD
//! ├── auth.rs     ◄─── Login, logout, session status
//! └── config.rs   ◄─── Display configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Browser                                                                │
//! │  ───────                                                                │
//! │  fetch('/api/admin/products', {                                         │
//! │    method: 'POST',                                                      │
//! │    headers: { Authorization: 'Bearer <token>' },                        │
//! │    body: JSON.stringify({ name: 'Blue Scarf', ... })                    │
//! │  });                                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  routes.rs (axum handler)                                               │
//! │  ─────────────────────────                                              │
//! │  State<DbState>, AdminSession (from the Bearer token), Json<Request>    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::product::add_product(&db, &config, &session, request)        │
//! │  -> Result<ProductDto, ApiError>                                        │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Browser receives: ProductDto or { code, message }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Public, only needs the database
//! async fn list_products(db: &DbState)
//!
//! // Admin-only: an AdminSession must be presented
//! async fn delete_product(db: &DbState, session: &AdminSession, id: i64)
//!
//! // Login needs the gate and the session store
//! async fn login(gate: &AdminGate, sessions: &SessionState, request: LoginRequest)
//! ```

pub mod auth;
pub mod config;
pub mod product;

#[cfg(test)]
pub(crate) mod test_support {
    use knitcraft_db::Database;

    use crate::config::AppConfig;
    use crate::state::{AdminSession, AppState};

    /// App state over a fresh in-memory store with the default admin seeded.
    pub async fn state() -> AppState {
        let config = AppConfig::for_tests();
        let db = Database::new(config.db_config()).await.unwrap();
        AppState::new(db, config)
    }

    /// Same as [`state`] plus a live admin session.
    pub async fn admin_state() -> (AppState, AdminSession) {
        let state = state().await;
        let session = state.sessions.open("admin");
        (state, session)
    }
}
