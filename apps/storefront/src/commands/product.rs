//! # Product Commands
//!
//! Storefront listing plus the admin add / edit / delete flow.
//!
//! ## Admin Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Admin Product Flow                                   │
//! │                                                                         │
//! │  Admin submits the add form                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decode base64 image ──── bad data ─────► VALIDATION_ERROR             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_product ── missing field ─► VALIDATION_ERROR             │
//! │       │                  (store never called)                          │
//! │       ▼                                                                 │
//! │  products().insert ─────────────────────► ProductDto (fresh id)        │
//! │                                                                         │
//! │  Edit:   validate_changes ─► products().update(id) ─► ProductDto       │
//! │  Delete: products().delete(id)                                         │
//! │  Unknown id on edit/delete ─────────────► NOT_FOUND                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use knitcraft_core::validation::{validate_changes, validate_new_product, ProductForm};
use knitcraft_core::{CoreError, ImageFormat, Product, ProductChanges, ValidationError};
use knitcraft_db::Database;

use crate::error::ApiError;
use crate::state::{AdminSession, ConfigState, DbState};

/// Message shown when the add form is incomplete.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Please fill all fields and upload an image.";

// =============================================================================
// DTOs
// =============================================================================

/// Product as shown on the storefront.
///
/// Image bytes are not inlined; the browser fetches them from
/// `/api/products/{id}/image` when `has_image` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub has_image: bool,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            has_image: p.has_image(),
            id: p.id,
            name: p.name,
            price: p.price,
            category: p.category,
            description: p.description,
        }
    }
}

/// One row of the admin catalog table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRowDto {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
}

impl From<Product> for CatalogRowDto {
    fn from(p: Product) -> Self {
        CatalogRowDto {
            id: p.id,
            name: p.name,
            price: p.price,
            category: p.category,
        }
    }
}

/// Add form payload.
///
/// Absent fields default so that a half-filled form reaches validation and
/// gets the same message as an empty one. A field of the wrong JSON type
/// (`"price": null`) is rejected earlier, as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image_filename: Option<String>,
    /// Image bytes, base64. A `data:` URL prefix is tolerated.
    pub image_base64: Option<String>,
}

/// Edit form payload. The image is not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(r: UpdateProductRequest) -> Self {
        ProductChanges {
            name: r.name,
            price: r.price,
            description: r.description,
            category: r.category,
        }
    }
}

/// Stored image bytes plus the format detected from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub format: Option<ImageFormat>,
    pub bytes: Vec<u8>,
}

impl ProductImage {
    /// Content type to serve the bytes with.
    pub fn content_type(&self) -> &'static str {
        self.format
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream")
    }
}

// =============================================================================
// Storefront Commands
// =============================================================================

/// Lists every product for the storefront, in insertion order.
pub async fn list_products(db: &DbState) -> Result<Vec<ProductDto>, ApiError> {
    let start = Instant::now();
    let db_inner: &Database = db.inner();

    let products = db_inner.products().list_all().await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();

    debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = dtos.len(),
        "list_products complete"
    );
    Ok(dtos)
}

/// Returns the stored image of a product.
///
/// `NOT_FOUND` when the product does not exist or its stored image is
/// absent or zero bytes long.
pub async fn get_product_image(db: &DbState, id: i64) -> Result<ProductImage, ApiError> {
    debug!(id = %id, "get_product_image command");

    let product = db
        .inner()
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    let bytes = product
        .image
        .filter(|bytes| !bytes.is_empty())
        .ok_or(CoreError::ImageMissing(id))?;
    Ok(ProductImage {
        format: ImageFormat::sniff(&bytes),
        bytes,
    })
}

// =============================================================================
// Admin Commands
// =============================================================================

/// Lists the catalog for the admin table.
pub async fn admin_list_products(
    db: &DbState,
    session: &AdminSession,
) -> Result<Vec<CatalogRowDto>, ApiError> {
    debug!(admin = %session.username(), "admin_list_products command");

    let products = db.inner().products().list_all().await?;
    Ok(products.into_iter().map(CatalogRowDto::from).collect())
}

/// Validates the add form and inserts the product.
///
/// Nothing reaches the store unless every field passes.
pub async fn add_product(
    db: &DbState,
    config: &ConfigState,
    session: &AdminSession,
    request: AddProductRequest,
) -> Result<ProductDto, ApiError> {
    debug!(admin = %session.username(), name = %request.name, "add_product command");

    let image = request
        .image_base64
        .as_deref()
        .map(decode_image)
        .transpose()?;

    let form = ProductForm {
        name: request.name,
        price: request.price,
        description: request.description,
        category: request.category,
        image_filename: request.image_filename,
        image,
    };

    let new_product =
        validate_new_product(form, config.max_image_bytes()).map_err(add_form_error)?;

    let id = db.inner().products().insert(&new_product).await?;

    info!(id = %id, name = %new_product.name, admin = %session.username(), "Product added");

    Ok(ProductDto {
        id,
        has_image: new_product.image.is_some(),
        name: new_product.name,
        price: new_product.price,
        category: new_product.category,
        description: new_product.description,
    })
}

/// Applies the edit form to an existing product. The image is kept.
pub async fn update_product(
    db: &DbState,
    session: &AdminSession,
    id: i64,
    request: UpdateProductRequest,
) -> Result<ProductDto, ApiError> {
    debug!(admin = %session.username(), id = %id, "update_product command");

    let changes = validate_changes(request.into())?;
    let products = db.inner().products();

    products.update(id, &changes).await?;
    let product = products
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    info!(id = %id, admin = %session.username(), "Product updated");
    Ok(product.into())
}

/// Deletes a product.
pub async fn delete_product(
    db: &DbState,
    session: &AdminSession,
    id: i64,
) -> Result<(), ApiError> {
    debug!(admin = %session.username(), id = %id, "delete_product command");

    db.inner().products().delete(id).await?;

    info!(id = %id, admin = %session.username(), "Product deleted");
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn decode_image(encoded: &str) -> Result<Vec<u8>, ApiError> {
    let payload = match encoded.split_once("base64,") {
        Some((_, data)) => data,
        None => encoded,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|_| ApiError::validation("Image data is not valid base64"))
}

/// Missing or zero fields all read as an incomplete form. Anything else
/// keeps its specific message.
fn add_form_error(err: ValidationError) -> ApiError {
    match err {
        ValidationError::Required { .. } | ValidationError::MustBePositive { .. } => {
            ApiError::validation(INCOMPLETE_FORM_MESSAGE)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::admin_state;
    use crate::error::ErrorCode;
    use knitcraft_core::NewProduct;

    const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    fn scarf() -> AddProductRequest {
        AddProductRequest {
            name: "Blue Scarf".to_string(),
            price: 499.0,
            description: "Soft wool scarf".to_string(),
            category: "Scarf".to_string(),
            image_filename: Some("scarf.png".to_string()),
            image_base64: Some(STANDARD.encode(PNG)),
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let (state, session) = admin_state().await;

        let added = add_product(&state.db, &state.config, &session, scarf())
            .await
            .unwrap();
        assert!(added.has_image);

        let listed = list_products(&state.db).await.unwrap();
        assert_eq!(listed, vec![added.clone()]);

        let rows = admin_list_products(&state.db, &session).await.unwrap();
        assert_eq!(rows[0].id, added.id);
        assert_eq!(rows[0].category, "Scarf");
    }

    #[tokio::test]
    async fn test_add_without_image_is_incomplete() {
        let (state, session) = admin_state().await;
        let request = AddProductRequest {
            image_base64: None,
            ..scarf()
        };

        let err = add_product(&state.db, &state.config, &session, request)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, INCOMPLETE_FORM_MESSAGE);
        assert!(list_products(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_bad_extension_and_bad_base64() {
        let (state, session) = admin_state().await;

        let gif = AddProductRequest {
            image_filename: Some("scarf.gif".to_string()),
            ..scarf()
        };
        let err = add_product(&state.db, &state.config, &session, gif)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_ne!(err.message, INCOMPLETE_FORM_MESSAGE);

        let garbage = AddProductRequest {
            image_base64: Some("***".to_string()),
            ..scarf()
        };
        let err = add_product(&state.db, &state.config, &session, garbage)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_data_url_prefix_accepted() {
        let (state, session) = admin_state().await;
        let request = AddProductRequest {
            image_base64: Some(format!("data:image/png;base64,{}", STANDARD.encode(PNG))),
            ..scarf()
        };

        let added = add_product(&state.db, &state.config, &session, request)
            .await
            .unwrap();
        let image = get_product_image(&state.db, added.id).await.unwrap();
        assert_eq!(image.bytes, PNG.to_vec());
        assert_eq!(image.content_type(), "image/png");
    }

    #[tokio::test]
    async fn test_update_keeps_image() {
        let (state, session) = admin_state().await;
        let added = add_product(&state.db, &state.config, &session, scarf())
            .await
            .unwrap();

        let request = UpdateProductRequest {
            name: "Blue Scarf".to_string(),
            price: 599.0,
            description: "Soft wool scarf".to_string(),
            category: "anything goes".to_string(),
        };
        let updated = update_product(&state.db, &session, added.id, request)
            .await
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.price, 599.0);
        assert_eq!(updated.category, "anything goes");
        assert!(updated.has_image);
    }

    #[tokio::test]
    async fn test_update_validation_and_not_found() {
        let (state, session) = admin_state().await;

        let blank = UpdateProductRequest {
            name: "  ".to_string(),
            price: 1.0,
            ..Default::default()
        };
        let err = update_product(&state.db, &session, 1, blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let free = UpdateProductRequest {
            name: "Ghost".to_string(),
            price: 0.0,
            ..Default::default()
        };
        let err = update_product(&state.db, &session, 42, free).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let (state, session) = admin_state().await;
        let added = add_product(&state.db, &state.config, &session, scarf())
            .await
            .unwrap();

        delete_product(&state.db, &session, added.id).await.unwrap();
        assert!(list_products(&state.db).await.unwrap().is_empty());

        let err = delete_product(&state.db, &session, added.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(list_products(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_of_missing_product() {
        let (state, _) = admin_state().await;
        let err = get_product_image(&state.db, 7).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_image_absent_or_empty_is_not_found() {
        let (state, _) = admin_state().await;
        let products = state.db.inner().products();

        for image in [None, Some(Vec::new())] {
            let id = products
                .insert(&NewProduct {
                    name: "Bare Mittens".to_string(),
                    price: 150.0,
                    description: "Imported without a photo".to_string(),
                    category: "Accessory".to_string(),
                    image,
                })
                .await
                .unwrap();

            let err = get_product_image(&state.db, id).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::NotFound);
            assert_eq!(err.message, format!("Product {id} has no image"));
        }
    }

    #[test]
    fn test_unknown_bytes_served_as_octet_stream() {
        let image = ProductImage {
            format: ImageFormat::sniff(b"plain"),
            bytes: b"plain".to_vec(),
        };
        assert_eq!(image.content_type(), "application/octet-stream");
    }
}
