//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! The `Database` from `knitcraft-db` holds a `SqlitePool`, which is
//! thread-safe; handlers can run queries concurrently without locking.

use knitcraft_db::Database;

/// Wrapper around `Database` for router state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let products = db_state.inner().products().list_all().await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
