//! # Admin Repository
//!
//! Lookup and seeding of admin credentials.
//!
//! The comparison of a supplied password against the stored one is not done
//! in SQL: the storefront fetches the row by username and hands it to a
//! `CredentialVerifier`, so a hashing scheme can replace plain text without
//! touching these queries.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use knitcraft_core::AdminCredential;

/// Repository for the `admin_users` table.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Creates a new AdminRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Finds the credential row for an exact (case-sensitive) username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<AdminCredential>> {
        debug!(username = %username, "Looking up admin credential");

        let credential = sqlx::query_as::<_, AdminCredential>(
            "SELECT username, password FROM admin_users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    /// Inserts an admin account.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the username is taken
    pub async fn insert(&self, credential: &AdminCredential) -> DbResult<()> {
        sqlx::query("INSERT INTO admin_users (username, password) VALUES (?1, ?2)")
            .bind(&credential.username)
            .bind(&credential.password)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => {
                    DbError::duplicate(field, credential.username.clone())
                }
                other => other,
            })?;

        Ok(())
    }

    /// Inserts `credential` only if the table has no rows at all.
    ///
    /// Runs as a single statement, so two processes starting against the
    /// same fresh file cannot both seed.
    ///
    /// ## Returns
    /// `true` if the account was inserted.
    pub async fn seed_default(&self, credential: &AdminCredential) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (username, password)
            SELECT ?1, ?2
            WHERE NOT EXISTS (SELECT 1 FROM admin_users)
            "#,
        )
        .bind(&credential.username)
        .bind(&credential.password)
        .execute(&self.pool)
        .await?;

        let seeded = result.rows_affected() == 1;
        if seeded {
            info!(username = %credential.username, "Seeded default admin account");
        }
        Ok(seeded)
    }

    /// Counts admin accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn empty_repo() -> AdminRepository {
        Database::new(DbConfig::in_memory().seed_admin(None))
            .await
            .unwrap()
            .admins()
    }

    #[tokio::test]
    async fn test_seed_only_into_empty_table() {
        let repo = empty_repo().await;

        assert!(repo
            .seed_default(&AdminCredential::new("admin", "admin123"))
            .await
            .unwrap());
        assert!(!repo
            .seed_default(&AdminCredential::new("other", "pw"))
            .await
            .unwrap());

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_username("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_existing_admin_blocks_seed() {
        let repo = empty_repo().await;
        repo.insert(&AdminCredential::new("owner", "s3cret"))
            .await
            .unwrap();

        assert!(!repo
            .seed_default(&AdminCredential::new("admin", "admin123"))
            .await
            .unwrap());
        assert!(repo.find_by_username("admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repo = empty_repo().await;
        repo.insert(&AdminCredential::new("owner", "a")).await.unwrap();

        let err = repo
            .insert(&AdminCredential::new("owner", "b"))
            .await
            .unwrap_err();
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "owner"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let repo = empty_repo().await;
        repo.insert(&AdminCredential::new("admin", "admin123"))
            .await
            .unwrap();

        assert!(repo.find_by_username("admin").await.unwrap().is_some());
        assert!(repo.find_by_username("ADMIN").await.unwrap().is_none());
        assert!(repo.find_by_username("").await.unwrap().is_none());
    }
}
