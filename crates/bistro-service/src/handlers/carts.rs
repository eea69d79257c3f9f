//! Shopping cart handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use bistro_core::{CartItem, CartItemId, MenuItemId};

use crate::error::ApiError;
use crate::state::AppState;

/// Cart listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListCartsQuery {
    /// Owner email to list cart items for.
    pub email: String,
}

/// List cart items for one owner.
pub async fn list_cart_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCartsQuery>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    Ok(Json(state.store.list_cart_items_by_owner(&query.email)?))
}

/// Add-to-cart request.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    /// Owner email.
    pub email: String,
    /// Menu item being added.
    pub menu_item_id: MenuItemId,
    /// Dish name snapshot.
    pub name: String,
    /// Image URL snapshot.
    pub image: String,
    /// Price snapshot in dollars.
    pub price: f64,
}

/// Add an item to a cart.
pub async fn add_cart_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddCartItemRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let item = CartItem::new(body.email, body.menu_item_id, body.name, body.image, body.price);
    state.store.put_cart_item(&item)?;

    Ok(Json(serde_json::json!({ "inserted_id": item.id.to_string() })))
}

/// Remove a single cart item.
pub async fn delete_cart_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: CartItemId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid cart item id".into()))?;

    state.store.delete_cart_item(&id)?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
