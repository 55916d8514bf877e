//! # Database Handle
//!
//! Opens the store's SQLite file and hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DbConfig::new(path)            DbConfig::in_memory()                   │
//! │        │                              │  (tests: one private store)     │
//! │        └──────────────┬───────────────┘                                 │
//! │                       ▼                                                 │
//! │  Database::new(config)                                                  │
//! │     1. open or create the file (WAL journal)                            │
//! │     2. apply embedded migrations                                        │
//! │     3. insert config.seed_admin if admin_users has no rows              │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  db.products() / db.admins()  ◄── storefront owns `db` and passes      │
//! │                       │            clones to whoever needs it          │
//! │                       ▼                                                 │
//! │  db.close() on shutdown                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each statement auto-commits. There are no explicit transactions: every
//! store operation is a single statement.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use knitcraft_core::{AdminCredential, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::admin::AdminRepository;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// How to open the store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/knitcraft.db")
///     .max_connections(2)
///     .seed_admin(Some(AdminCredential::new("owner", "s3cret")));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size. A single admin and a handful of shoppers need very few.
    pub max_connections: u32,

    /// Connections held open even when idle.
    pub min_connections: u32,

    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,

    /// Idle connections above `min_connections` are dropped after this.
    pub idle_timeout: Duration,

    /// Account inserted when `admin_users` is empty after migrations.
    /// `None` disables seeding.
    pub seed_admin: Option<AdminCredential>,
}

impl DbConfig {
    /// File-backed store at `path`, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            seed_admin: Some(default_admin()),
        }
    }

    /// Private in-memory store.
    ///
    /// An SQLite `:memory:` database lives and dies with its connection, so
    /// the pool is pinned to exactly one.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(":memory:")
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Replaces the account seeded into an empty `admin_users` table.
    pub fn seed_admin(mut self, credential: Option<AdminCredential>) -> Self {
        self.seed_admin = credential;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }
}

fn default_admin() -> AdminCredential {
    AdminCredential::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
}

// =============================================================================
// Database
// =============================================================================

/// Owned database handle providing repository access.
///
/// Cloning is cheap (the pool is reference counted); every clone talks to
/// the same store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store, applies migrations and seeds the admin account.
    ///
    /// Fails if the file cannot be opened, migrated or seeded.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening store");

        let options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
        } else {
            SqliteConnectOptions::from_str(&format!("sqlite://{}", config.database_path.display()))
        }
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        db.run_migrations().await?;

        if let Some(credential) = &config.seed_admin {
            db.admins().seed_default(credential).await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call again on an up-to-date store.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;

        let (total, applied) = migrations::migration_status(&self.pool).await?;
        info!(total, applied, "Schema up to date");
        Ok(())
    }

    /// Raw pool, for diagnostics and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Product listings.
    ///
    /// ```rust,ignore
    /// let products = db.products().list_all().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Admin credentials.
    pub fn admins(&self) -> AdminRepository {
        AdminRepository::new(self.pool.clone())
    }

    /// Closes every connection. Later repository calls fail with
    /// [`DbError::ConnectionFailed`].
    pub async fn close(&self) {
        info!("Closing store");
        self.pool.close().await;
    }

    /// `true` if a trivial query round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_healthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DbConfig::new("/tmp/knitcraft-test.db")
            .max_connections(10)
            .min_connections(2)
            .seed_admin(None);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(config.seed_admin.is_none());
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_default_admin_seeded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let admin = db.admins().find_by_username("admin").await.unwrap();
        assert_eq!(admin, Some(AdminCredential::new("admin", "admin123")));
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let db = Database::new(DbConfig::in_memory().seed_admin(None))
            .await
            .unwrap();

        assert_eq!(db.admins().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_separate_in_memory_stores_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        a.products()
            .insert(&knitcraft_core::NewProduct {
                name: "Tiny Whale".to_string(),
                price: 249.0,
                description: String::new(),
                category: "Toy".to_string(),
                image: None,
            })
            .await
            .unwrap();

        assert_eq!(a.products().count().await.unwrap(), 1);
        assert_eq!(b.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        assert!(db.products().list_all().await.is_err());
    }
}
