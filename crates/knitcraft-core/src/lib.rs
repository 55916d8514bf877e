//! # knitcraft-core: Pure Domain Logic for KnitCraft Store
//!
//! Types and rules shared by the database layer and the storefront app.
//! Nothing in here touches the network, the file system or a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KnitCraft Store Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser (storefront + admin views)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             knitcraft-storefront (commands, sessions)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ knitcraft-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │   auth    │  │   image   │  │   │
//! │  │   │  Product  │  │ add/edit  │  │ Verifier  │  │ jpg / png │  │   │
//! │  │   │ Category  │  │  forms    │  │  trait    │  │  sniffing │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              knitcraft-db (SQLite, repositories)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, AdminCredential)
//! - [`validation`] - Add/edit form validation
//! - [`auth`] - Credential verification seam
//! - [`image`] - Upload allow-list and stored image detection
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use knitcraft_core::validation::{validate_new_product, ProductForm};
//!
//! let form = ProductForm {
//!     name: "Blue Scarf".to_string(),
//!     price: 499.0,
//!     description: "Soft wool scarf".to_string(),
//!     category: "Scarf".to_string(),
//!     image_filename: Some("scarf.jpg".to_string()),
//!     image: Some(vec![0xFF, 0xD8, 0xFF]),
//! };
//!
//! let product = validate_new_product(form, 1024).unwrap();
//! assert_eq!(product.name, "Blue Scarf");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod image;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{CredentialVerifier, PlaintextVerifier};
pub use error::{CoreError, ValidationError};
pub use image::ImageFormat;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Username of the admin account seeded on first startup.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the admin account seeded on first startup.
///
/// Stored and compared in plain text. See [`auth`] for the seam a hashing
/// verifier plugs into.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Maximum product name length accepted by the admin forms.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum description length accepted by the admin forms.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;
