//! # KnitCraft Storefront
//!
//! Local web surface for the store: a public product listing plus the
//! admin login and product management endpoints.
//!
//! ## Module Structure
//! ```text
//! src/
//! ├── main.rs         ◄─── Binary entry point
//! ├── lib.rs          ◄─── You are here (tracing, startup, serve)
//! ├── config.rs       ◄─── Environment configuration
//! ├── error.rs        ◄─── ApiError and HTTP status mapping
//! ├── routes.rs       ◄─── axum router and Bearer session extraction
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState and FromRef splits
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── gate.rs     ◄─── Admin credential check
//! │   ├── session.rs  ◄─── Admin session tokens
//! │   └── config.rs   ◄─── Read-only configuration
//! └── commands/
//!     ├── mod.rs      ◄─── Command exports
//!     ├── product.rs  ◄─── Listing and admin CRUD
//!     ├── auth.rs     ◄─── Login / logout
//!     └── config.rs   ◄─── Display configuration
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use knitcraft_db::Database;

use config::AppConfig;
use state::AppState;

/// Runs the storefront until Ctrl+C or SIGTERM.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Open Database ────────────────────────────────────────────────────► │
/// │     • Connect (WAL mode), run migrations                                │
/// │     • Seed the admin account if admin_users is empty                    │
/// │                                                                         │
/// │  2. Build State ──────────────────────────────────────────────────────► │
/// │     • DbState, AdminGate, SessionState, ConfigState                     │
/// │                                                                         │
/// │  3. Serve ────────────────────────────────────────────────────────────► │
/// │     • Bind KNITCRAFT_BIND_ADDR:KNITCRAFT_PORT                           │
/// │     • Graceful shutdown, then close the pool                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(db_path = ?config.database_path, "Opening database");
    let db = Database::new(config.db_config()).await?;

    let bind_address = config.bind_address();
    let app = routes::router(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "KnitCraft Store listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=knitcraft=trace` - Show trace for knitcraft crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info,knitcraft=debug,sqlx=warn";

fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
