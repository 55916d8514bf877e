//! # Product Repository
//!
//! Database operations for product listings.
//!
//! ## Key Operations
//! - Insert with a store-assigned id
//! - List everything in insertion order
//! - Update the mutable fields (never the id, never the image)
//! - Hard delete
//!
//! ## Unknown Ids
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update(99, ..) / delete(99) where no row has id 99                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Statement runs, rows_affected() == 0, nothing changes                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Err(DbError::NotFound { entity: "Product", id: "99" })                │
//! │                                                                         │
//! │  Deleting twice therefore leaves the same table as deleting once;      │
//! │  the second call just reports that there was nothing to delete.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use knitcraft_core::{NewProduct, Product, ProductChanges};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.insert(&new_product).await?;
/// let all = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns the id the store assigned.
    ///
    /// No validation happens here: callers validate the add form first and
    /// the store accepts whatever it is given.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<i64> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, description, category, image)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.image.as_deref())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");
        Ok(id)
    }

    /// Lists every product in insertion order.
    ///
    /// Re-queried on every call; nothing is cached.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, category, image
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, category, image
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces name, price, description and category of a product.
    ///
    /// The image column is not part of the statement and stays as stored.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No product has this id
    pub async fn update(&self, id: i64, changes: &ProductChanges) -> DbResult<()> {
        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                description = ?4,
                category = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(&changes.description)
        .bind(&changes.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Permanently removes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - No product has this id (nothing changed)
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn blue_scarf() -> NewProduct {
        NewProduct {
            name: "Blue Scarf".to_string(),
            price: 499.0,
            description: "Soft wool scarf".to_string(),
            category: "Scarf".to_string(),
            image: Some(vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]),
        }
    }

    fn scarf_changes(price: f64) -> ProductChanges {
        ProductChanges {
            name: "Blue Scarf".to_string(),
            price,
            description: "Soft wool scarf".to_string(),
            category: "Scarf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let repo = repo().await;
        let new = blue_scarf();

        let id = repo.insert(&new).await.unwrap();
        let all = repo.list_all().await.unwrap();

        assert_eq!(all.len(), 1);
        let stored = &all[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, new.name);
        assert_eq!(stored.price, new.price);
        assert_eq!(stored.description, new.description);
        assert_eq!(stored.category, new.category);
        assert_eq!(stored.image, new.image);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_in_insertion_order() {
        let repo = repo().await;

        let mut ids = Vec::new();
        for name in ["Red Hat", "Teddy Bear", "Cardigan"] {
            let mut p = blue_scarf();
            p.name = name.to_string();
            ids.push(repo.insert(&p).await.unwrap());
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Red Hat", "Teddy Bear", "Cardigan"]);

        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = repo().await;

        let first = repo.insert(&blue_scarf()).await.unwrap();
        repo.delete(first).await.unwrap();
        let second = repo.insert(&blue_scarf()).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_accepts_unvalidated_input() {
        let repo = repo().await;
        let odd = NewProduct {
            name: String::new(),
            price: 0.0,
            description: String::new(),
            category: "anything".to_string(),
            image: None,
        };

        let id = repo.insert(&odd).await.unwrap();
        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "");
        assert!(stored.image.is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_identity_and_image() {
        let repo = repo().await;
        let id = repo.insert(&blue_scarf()).await.unwrap();
        let other = repo.insert(&blue_scarf()).await.unwrap();

        repo.update(id, &scarf_changes(599.0)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);

        let updated = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.price, 599.0);
        assert_eq!(updated.image, blue_scarf().image);

        let untouched = repo.get_by_id(other).await.unwrap().unwrap();
        assert_eq!(untouched.price, 499.0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_and_changes_nothing() {
        let repo = repo().await;
        repo.insert(&blue_scarf()).await.unwrap();
        let before = repo.list_all().await.unwrap();

        let err = repo.update(999, &scarf_changes(1.0)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice_same_state_as_once() {
        let repo = repo().await;
        let keep = repo.insert(&blue_scarf()).await.unwrap();
        let gone = repo.insert(&blue_scarf()).await.unwrap();

        repo.delete(gone).await.unwrap();
        let after_once = repo.list_all().await.unwrap();

        assert!(repo.delete(gone).await.unwrap_err().is_not_found());
        let after_twice = repo.list_all().await.unwrap();

        assert_eq!(after_once, after_twice);
        assert_eq!(after_twice.len(), 1);
        assert_eq!(after_twice[0].id, keep);
    }

    #[tokio::test]
    async fn test_scarf_scenario() {
        let repo = repo().await;

        let id = repo.insert(&blue_scarf()).await.unwrap();
        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Blue Scarf");
        assert_eq!(all[0].price, 499.0);

        repo.update(id, &scarf_changes(599.0)).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap()[0].price, 599.0);

        repo.delete(id).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
