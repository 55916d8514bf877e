//! # Schema Migrations
//!
//! The SQL under `migrations/sqlite/` is compiled into the binary and
//! applied by [`crate::Database::new`] on every start.
//!
//! | file                     | creates                                 |
//! |--------------------------|-----------------------------------------|
//! | `001_initial_schema.sql` | `products`, `admin_users`               |
//!
//! Applied versions are recorded in `_sqlx_migrations`, so re-running is a
//! no-op. Schema changes go in a new numbered file; applied files are never
//! edited.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Migrations embedded at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    debug!("Migrations applied");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
