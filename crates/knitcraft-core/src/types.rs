//! # Domain Types
//!
//! Core domain types used throughout KnitCraft Store.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │ ProductChanges  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │   │  name           │   │  name           │       │
//! │  │  name, price    │   │  price          │   │  price          │       │
//! │  │  description    │   │  description    │   │  description    │       │
//! │  │  category       │   │  category       │   │  category       │       │
//! │  │  image (blob)   │   │  image          │   │  (no image!)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Category     │   │ AdminCredential │                             │
//! │  │  Scarf, Sweater │   │  username       │                             │
//! │  │  Toy, Accessory │   │  password       │                             │
//! │  │  Other          │   │                 │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Product::id` is assigned by the store on insert and never changes.
//! Updates go through [`ProductChanges`], which has no image field, so an
//! edit cannot touch the stored image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Category
// =============================================================================

/// Suggested product categories offered by the add form.
///
/// The stored column is free text: the edit form accepts any label, so
/// [`Product::category`] is a `String` and this enum only describes the
/// choices offered when a product is first listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Scarf,
    Sweater,
    Toy,
    Accessory,
    Other,
}

impl Category {
    /// All categories, in the order the add form lists them.
    pub const ALL: [Category; 5] = [
        Category::Scarf,
        Category::Sweater,
        Category::Toy,
        Category::Accessory,
        Category::Other,
    ];

    /// Returns the label stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Scarf => "Scarf",
            Category::Sweater => "Sweater",
            Category::Toy => "Toy",
            Category::Accessory => "Accessory",
            Category::Other => "Other",
        }
    }

    /// Returns every label as owned strings (for error messages and config).
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses a label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::labels(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier, immutable once assigned.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Price, currency-agnostic. Never negative.
    pub price: f64,

    /// Free text, may be empty.
    pub description: String,

    /// Category label (see [`Category`] for the suggested set).
    pub category: String,

    /// Raw uploaded image bytes, stored verbatim.
    pub image: Option<Vec<u8>>,
}

impl Product {
    /// Whether the product carries a non-empty image.
    pub fn has_image(&self) -> bool {
        self.image.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}

/// Fields supplied when listing a new product.
///
/// The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<Vec<u8>>,
}

/// The mutable fields of a product.
///
/// There is no image field: edits replace name, price, description and
/// category and leave the stored image as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

// =============================================================================
// Admin Credential
// =============================================================================

/// A row of the admin account table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AdminCredential {
    /// Unique login name.
    pub username: String,

    /// Plain text password.
    pub password: String,
}

impl AdminCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        AdminCredential {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scarf() -> Product {
        Product {
            id: 7,
            name: "Blue Scarf".to_string(),
            price: 499.0,
            description: "Soft wool scarf".to_string(),
            category: "Scarf".to_string(),
            image: Some(vec![1, 2, 3]),
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("scarf".parse::<Category>().unwrap(), Category::Scarf);
        assert_eq!(" ACCESSORY ".parse::<Category>().unwrap(), Category::Accessory);
        assert!("Mittens".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_labels_in_form_order() {
        assert_eq!(
            Category::labels(),
            vec!["Scarf", "Sweater", "Toy", "Accessory", "Other"]
        );
    }

    #[test]
    fn test_has_image() {
        let mut product = scarf();
        assert!(product.has_image());

        product.image = Some(Vec::new());
        assert!(!product.has_image());

        product.image = None;
        assert!(!product.has_image());
    }

    #[test]
    fn test_credential_debug_hides_password() {
        let cred = AdminCredential::new("admin", "admin123");
        let printed = format!("{:?}", cred);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("admin123"));
    }

    #[test]
    fn test_product_serializes_category_as_text() {
        let json = serde_json::to_value(scarf()).unwrap();
        assert_eq!(json["category"], "Scarf");
        assert_eq!(json["price"], 499.0);
    }
}
