//! # Validation Module
//!
//! Admin form validation for KnitCraft Store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── number input with min 0                                           │
//! │  └── upload control restricted to jpg / png / jpeg                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: required fields, price, image allow-list & size      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Product store                                                │
//! │  └── Accepts whatever it is given (NOT NULL constraints only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adding a product requires every field, including an image. Editing only
//! requires a name and a sane price; the category becomes free text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::image::ImageFormat;
use crate::types::{Category, NewProduct, ProductChanges};
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw contents of the "add product" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    /// Name of the uploaded file, used for the extension allow-list.
    pub image_filename: Option<String>,
    pub image: Option<Vec<u8>>,
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: non-blank, at most [`MAX_NAME_LENGTH`] chars.
///
/// ```rust
/// use knitcraft_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Blue Scarf").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price: finite and not negative. Zero is allowed.
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

fn validate_description_length(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the add form and produces the record to insert.
///
/// ## Rules
/// - name and description must not be blank
/// - price must be finite and strictly positive (a zero price counts as
///   "not filled in" on the add form)
/// - category must be one of [`Category::ALL`]
/// - an image must be uploaded, with a jpg/png/jpeg file name and at most
///   `max_image_bytes` bytes
pub fn validate_new_product(form: ProductForm, max_image_bytes: usize) -> ValidationResult<NewProduct> {
    validate_product_name(&form.name)?;

    validate_price(form.price)?;
    if form.price == 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if form.description.trim().is_empty() {
        return Err(ValidationError::required("description"));
    }
    validate_description_length(&form.description)?;

    let category = Category::from_str(&form.category)?;

    let image = match form.image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ValidationError::required("image")),
    };

    let filename = form
        .image_filename
        .ok_or_else(|| ValidationError::required("image filename"))?;
    ImageFormat::from_filename(&filename)?;

    if image.len() > max_image_bytes {
        return Err(ValidationError::TooLarge {
            field: "image".to_string(),
            max: max_image_bytes,
        });
    }

    Ok(NewProduct {
        name: form.name.trim().to_string(),
        price: form.price,
        description: form.description,
        category: category.as_str().to_string(),
        image: Some(image),
    })
}

/// Validates the edit form.
///
/// Name must not be blank and price must be finite and non-negative. The
/// category is free text here and may be anything, including empty.
pub fn validate_changes(changes: ProductChanges) -> ValidationResult<ProductChanges> {
    validate_product_name(&changes.name)?;
    validate_price(changes.price)?;
    validate_description_length(&changes.description)?;

    Ok(ProductChanges {
        name: changes.name.trim().to_string(),
        ..changes
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "Blue Scarf".to_string(),
            price: 499.0,
            description: "Soft wool scarf".to_string(),
            category: "Scarf".to_string(),
            image_filename: Some("scarf.png".to_string()),
            image: Some(vec![0x89, b'P', b'N', b'G']),
        }
    }

    #[test]
    fn test_valid_form_produces_new_product() {
        let product = validate_new_product(form(), 1024).unwrap();
        assert_eq!(product.name, "Blue Scarf");
        assert_eq!(product.price, 499.0);
        assert_eq!(product.category, "Scarf");
        assert_eq!(product.image.unwrap().len(), 4);
    }

    #[test]
    fn test_category_is_normalized() {
        let mut f = form();
        f.category = "toy".to_string();
        assert_eq!(validate_new_product(f, 1024).unwrap().category, "Toy");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut f = form();
        f.name = "  ".to_string();
        assert!(matches!(
            validate_new_product(f, 1024),
            Err(ValidationError::Required { .. })
        ));

        let mut f = form();
        f.description = String::new();
        assert!(validate_new_product(f, 1024).is_err());

        let mut f = form();
        f.image = None;
        assert!(validate_new_product(f, 1024).is_err());

        let mut f = form();
        f.image = Some(Vec::new());
        assert!(validate_new_product(f, 1024).is_err());
    }

    #[test]
    fn test_zero_price_rejected_on_add() {
        let mut f = form();
        f.price = 0.0;
        assert!(matches!(
            validate_new_product(f, 1024),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_bad_price_rejected() {
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let mut f = form();
            f.price = price;
            assert!(validate_new_product(f, 1024).is_err(), "price {price}");
        }
    }

    #[test]
    fn test_image_rules() {
        let mut f = form();
        f.image_filename = Some("scarf.gif".to_string());
        assert!(matches!(
            validate_new_product(f, 1024),
            Err(ValidationError::NotAllowed { .. })
        ));

        let mut f = form();
        f.image_filename = None;
        assert!(validate_new_product(f, 1024).is_err());

        assert!(matches!(
            validate_new_product(form(), 3),
            Err(ValidationError::TooLarge { max: 3, .. })
        ));
    }

    #[test]
    fn test_unknown_category_rejected_on_add() {
        let mut f = form();
        f.category = "Mittens".to_string();
        assert!(validate_new_product(f, 1024).is_err());
    }

    #[test]
    fn test_changes_allow_free_text_category_and_zero_price() {
        let changes = ProductChanges {
            name: " Blue Scarf ".to_string(),
            price: 0.0,
            description: String::new(),
            category: "Winter Specials".to_string(),
        };
        let validated = validate_changes(changes).unwrap();
        assert_eq!(validated.name, "Blue Scarf");
        assert_eq!(validated.category, "Winter Specials");
    }

    #[test]
    fn test_changes_reject_negative_price() {
        let changes = ProductChanges {
            name: "Blue Scarf".to_string(),
            price: -5.0,
            description: String::new(),
            category: "Scarf".to_string(),
        };
        assert!(matches!(
            validate_changes(changes),
            Err(ValidationError::Negative { .. })
        ));
    }
}
