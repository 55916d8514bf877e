//! # HTTP Routes
//!
//! Thin axum handlers over [`crate::commands`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  method  path                         command              auth          │
//! │  ──────  ───────────────────────────  ───────────────────  ─────         │
//! │  GET     /health                      health check          -            │
//! │  GET     /api/config                  get_config            -            │
//! │  GET     /api/products                list_products         -            │
//! │  GET     /api/products/{id}/image     get_product_image     -            │
//! │  POST    /api/admin/login             login                 -            │
//! │  POST    /api/admin/logout            logout                Bearer       │
//! │  GET     /api/admin/session           session_status        Bearer       │
//! │  GET     /api/admin/products          admin_list_products   Bearer       │
//! │  POST    /api/admin/products          add_product           Bearer       │
//! │  PUT     /api/admin/products/{id}     update_product        Bearer       │
//! │  DELETE  /api/admin/products/{id}     delete_product        Bearer       │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Admin handlers take an [`AdminSession`] argument. It is extracted from the
//! `Authorization: Bearer <token>` header, so a request without a live token
//! is rejected with 401 before the handler body runs.
//!
//! Bodies and path ids go through [`JsonBody`] and [`ProductId`], so a
//! malformed request gets the same `{code, message}` shape as every other
//! error.

use axum::extract::{DefaultBodyLimit, FromRef, FromRequest, FromRequestParts, Path, Request, State};
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::de::DeserializeOwned;

use crate::commands::auth::{self, LoginRequest, LoginResponse, SessionDto};
use crate::commands::config::{self, ConfigDto};
use crate::commands::product::{
    self, AddProductRequest, CatalogRowDto, ProductDto, UpdateProductRequest,
};
use crate::error::ApiError;
use crate::state::{AdminGate, AdminSession, AppState, ConfigState, DbState, SessionState};

const LOGIN_REQUIRED: &str = "Admin login required";

/// Builds the full router over `state`.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.app().body_limit();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/config", get(config_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/products/{id}/image", get(product_image_handler))
        .route("/api/admin/login", post(login_handler))
        .route("/api/admin/logout", post(logout_handler))
        .route("/api/admin/session", get(session_handler))
        .route(
            "/api/admin/products",
            get(admin_list_handler).post(add_product_handler),
        )
        .route(
            "/api/admin/products/{id}",
            put(update_product_handler).delete(delete_product_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// =============================================================================
// Session Extraction
// =============================================================================

impl<S> FromRequestParts<S> for AdminSession
where
    SessionState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionState::from_ref(state);

        bearer_token(&parts.headers)
            .and_then(|token| sessions.authorize(token))
            .ok_or_else(|| ApiError::unauthorized(LOGIN_REQUIRED))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .trim();

    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Body and Path Extraction
// =============================================================================

/// JSON request body. Rejections become `400 VALIDATION_ERROR`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// `{id}` path segment. A non-integer id is a `400 VALIDATION_ERROR`.
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(ProductId(id))
    }
}

// =============================================================================
// Public Handlers
// =============================================================================

async fn health_handler(State(db): State<DbState>) -> impl IntoResponse {
    if db.inner().health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DATABASE UNAVAILABLE")
    }
}

async fn config_handler(State(settings): State<ConfigState>) -> Json<ConfigDto> {
    Json(config::get_config(&settings))
}

async fn list_products_handler(
    State(db): State<DbState>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    product::list_products(&db).await.map(Json)
}

async fn product_image_handler(
    State(db): State<DbState>,
    ProductId(id): ProductId,
) -> Result<Response, ApiError> {
    let image = product::get_product_image(&db, id).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type())], image.bytes).into_response())
}

// =============================================================================
// Admin Handlers
// =============================================================================

async fn login_handler(
    State(gate): State<AdminGate>,
    State(sessions): State<SessionState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    auth::login(&gate, &sessions, request).await.map(Json)
}

async fn logout_handler(
    State(sessions): State<SessionState>,
    session: AdminSession,
) -> Result<StatusCode, ApiError> {
    auth::logout(&sessions, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn session_handler(session: AdminSession) -> Json<SessionDto> {
    Json(auth::session_status(&session))
}

async fn admin_list_handler(
    State(db): State<DbState>,
    session: AdminSession,
) -> Result<Json<Vec<CatalogRowDto>>, ApiError> {
    product::admin_list_products(&db, &session).await.map(Json)
}

async fn add_product_handler(
    State(db): State<DbState>,
    State(config): State<ConfigState>,
    session: AdminSession,
    JsonBody(request): JsonBody<AddProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let added = product::add_product(&db, &config, &session, request).await?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn update_product_handler(
    State(db): State<DbState>,
    session: AdminSession,
    ProductId(id): ProductId,
    JsonBody(request): JsonBody<UpdateProductRequest>,
) -> Result<Json<ProductDto>, ApiError> {
    product::update_product(&db, &session, id, request).await.map(Json)
}

async fn delete_product_handler(
    State(db): State<DbState>,
    session: AdminSession,
    ProductId(id): ProductId,
) -> Result<StatusCode, ApiError> {
    product::delete_product(&db, &session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer  abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
