use axum::extract::Path;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{OrderCreate, OrderRecord, OrderStatusUpdate, Role};
use crate::store;

/// POST /api/orders/ - customer places an order for an available product
pub async fn create(
    user: CurrentUser,
    Json(req): Json<OrderCreate>,
) -> Result<Json<OrderRecord>, ApiError> {
    user.require_role(Role::Customer, "Only customers can create orders")?;

    // No row means the product is missing or unavailable; the single write
    // cannot tell them apart.
    let order = store::orders::create_for_customer(&user.email, &req)
        .await?
        .ok_or_else(|| ApiError::bad_request("Failed to create order"))?;

    Ok(Json(order))
}

/// GET /api/orders/baker/me - orders for the baker's own products
pub async fn baker_orders(user: CurrentUser) -> Result<Json<Vec<OrderRecord>>, ApiError> {
    user.require_role(Role::Baker, "Access denied: Not a baker")?;

    let orders = store::orders::for_baker(&user.email).await?;
    Ok(Json(orders))
}

/// GET /api/orders/admin/all - every order with product, customer and baker
pub async fn all_orders(user: CurrentUser) -> Result<Json<Vec<OrderRecord>>, ApiError> {
    user.require_role(Role::Admin, "Admins only")?;

    let orders = store::orders::all().await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:order_id/status - baker or admin sets the order status.
/// No ownership check and no status vocabulary; succeeds even when no order
/// matched the id.
pub async fn update_status(
    user: CurrentUser,
    Path(order_id): Path<String>,
    Json(req): Json<OrderStatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    user.require_any_role(&[Role::Baker, Role::Admin], "Not authorized")?;

    store::orders::set_status(&order_id, &req.status).await?;
    Ok(Json(json!({"message": "Order status updated successfully"})))
}
