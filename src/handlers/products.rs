use axum::extract::{Path, Query};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{ProductCreate, ProductPatch, ProductRecord, ProductSearchQuery, Role};
use crate::store;

/// POST /api/products/ - baker creates a product, linked BAKES to them
pub async fn create(
    user: CurrentUser,
    Json(req): Json<ProductCreate>,
) -> Result<Json<ProductRecord>, ApiError> {
    user.require_role(Role::Baker, "Only bakers can create products")?;

    let product = store::products::create_for_baker(&user.email, &req)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Failed to create product"))?;

    Ok(Json(product))
}

/// GET /api/products/baker/me - the baker's own products
pub async fn baker_products(user: CurrentUser) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    user.require_role(Role::Baker, "Access denied: Not a baker")?;

    let products = store::products::for_baker(&user.email).await?;
    Ok(Json(products))
}

/// GET /api/products/ - public listing of available products with optional
/// search and price-bound filters
pub async fn list(
    Query(filter): Query<ProductSearchQuery>,
) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    let products = store::products::list_available(&filter).await?;
    Ok(Json(products))
}

/// PUT /api/products/:product_id - partial update, owning baker only.
/// Ownership is the BAKES match itself; applies exactly the supplied fields
/// and returns the refreshed record from a follow-up read.
pub async fn update(
    user: CurrentUser,
    Path(product_id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<ProductRecord>, ApiError> {
    if !store::products::is_owned_by(&user.email, &product_id).await? {
        return Err(ApiError::not_found("Product not found or not owned by baker"));
    }

    store::products::apply_patch(&product_id, &patch).await?;

    let refreshed = store::products::get_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(refreshed))
}

/// DELETE /api/products/:product_id - soft delete scoped to the caller's
/// BAKES match; reports success even when nothing matched
pub async fn delete(
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    store::products::mark_unavailable(&user.email, &product_id).await?;
    Ok(Json(json!({"message": "Product marked as unavailable"})))
}
