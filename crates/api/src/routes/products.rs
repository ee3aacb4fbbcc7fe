//! Product catalog routes, including image upload.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    middleware::{AuthUser, require_admin},
};
use bizdesk_core::catalog::{CreateProductInput, Product, ProductService, UpdateProductInput};
use bizdesk_core::storage::StorageService;
use bizdesk_db::ProductRepository;
use bizdesk_shared::AppError;
use bizdesk_shared::types::{PageRequest, PageResponse};

/// Multipart field carrying image files.
pub const IMAGES_FIELD: &str = "images";

/// Cap on a whole upload request. Each file is also checked against `upload.max_file_size`.
const MAX_UPLOAD_BODY: usize = 25 * 1024 * 1024;

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product.layer(middleware::from_fn(require_admin))),
        )
        .route(
            "/products/image/{id}",
            post(upload_images).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Unique product code.
    #[validate(length(max = 64, message = "Code is too long!"))]
    pub code: String,
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// List price.
    pub unit_price: Decimal,
}

/// Request body for updating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New code.
    #[validate(length(max = 64, message = "Code is too long!"))]
    pub code: Option<String>,
    /// New name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New list price.
    pub unit_price: Option<Decimal>,
}

// ============================================================================
// Route Handlers
// ============================================================================

fn service(state: &AppState) -> ProductService<ProductRepository> {
    ProductService::new(Arc::new(ProductRepository::new((*state.db).clone())))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    payload.validate()?;

    let product = service(&state)
        .create_product(CreateProductInput {
            code: payload.code,
            name: payload.name,
            description: payload.description,
            unit_price: payload.unit_price,
        })
        .await?;

    info!(product_id = %product.id, code = %product.code, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products - Paginated with `page` and `per_page`.
async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<Product>>> {
    let page = page.normalized();
    let (products, total) = service(&state).list_products(&page).await?;

    Ok(Json(PageResponse::new(
        products,
        page.page,
        page.per_page,
        total,
    )))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    Ok(Json(service(&state).get_product(id).await?))
}

/// PATCH /products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    payload.validate()?;

    let product = service(&state)
        .update_product(
            id,
            UpdateProductInput {
                code: payload.code,
                name: payload.name,
                description: payload.description,
                unit_price: payload.unit_price,
            },
        )
        .await?;

    info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// DELETE /products/{id} - Admin only.
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    service(&state).delete_product(id).await?;

    info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/image/{id} - Multipart upload, one or more `images` fields.
///
/// The whole body is read before anything is written. Files are then stored
/// and their generated names appended to the product; on failure the files
/// already written are removed.
async fn upload_images(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<Product>> {
    let products = service(&state);
    products.get_product(id).await?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        files.push((original_name, content_type, field.bytes().await?));
    }

    if files.is_empty() {
        return Err(AppError::Validation(format!(
            "At least one file is required in the '{IMAGES_FIELD}' field!"
        ))
        .into());
    }

    let mut stored = Vec::with_capacity(files.len());
    for (original_name, content_type, data) in files {
        match state
            .storage
            .store_product_image(id, &original_name, &content_type, data)
            .await
        {
            Ok(image) => stored.push(image),
            Err(e) => {
                remove_images(&state.storage, id, &stored).await;
                return Err(e.into());
            }
        }
    }

    let file_names = stored.iter().map(|image| image.file_name.clone()).collect();
    match products.add_images(id, file_names).await {
        Ok(product) => {
            info!(
                product_id = %id,
                user_id = %user.user_id(),
                count = stored.len(),
                "Product images uploaded"
            );
            Ok(Json(product))
        }
        Err(e) => {
            remove_images(&state.storage, id, &stored).await;
            Err(e.into())
        }
    }
}

async fn remove_images(
    storage: &StorageService,
    product_id: Uuid,
    images: &[bizdesk_core::storage::StoredImage],
) {
    for image in images {
        if let Err(e) = storage.delete(&image.key).await {
            warn!(product_id = %product_id, key = %image.key, error = %e, "Failed to remove image");
        }
    }
}
