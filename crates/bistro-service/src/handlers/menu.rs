//! Menu handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use bistro_core::{MenuItem, MenuItemId};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

/// List the full menu.
pub async fn list_menu(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.store.list_menu()?))
}

/// New menu item request.
#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    /// Dish name.
    pub name: String,
    /// Short description.
    pub recipe: String,
    /// Image URL.
    pub image: String,
    /// Category.
    pub category: String,
    /// Price in dollars.
    pub price: f64,
}

/// Add a menu item (admin only).
pub async fn create_menu_item(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(body): Json<CreateMenuItemRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let item = MenuItem::new(body.name, body.recipe, body.image, body.category, body.price);
    state.store.put_menu_item(&item)?;

    tracing::info!(menu_item_id = %item.id, name = %item.name, "Menu item added");

    Ok(Json(serde_json::json!({ "inserted_id": item.id.to_string() })))
}

/// Delete a menu item (admin only).
pub async fn delete_menu_item(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: MenuItemId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid menu item id".into()))?;

    state.store.delete_menu_item(&id)?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
