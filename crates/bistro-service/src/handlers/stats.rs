//! Admin statistics handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Admin statistics rollup.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Approximate number of registered users.
    pub users: u64,
    /// Approximate number of menu items.
    pub menu_items: u64,
    /// Approximate number of recorded payments.
    pub orders: u64,
    /// Total revenue in dollars across all payments.
    pub revenue: f64,
}

/// Compute the admin rollup (admin only).
///
/// Always recomputed from the live collections; nothing is cached. Counts
/// use the store's fast approximate estimates; revenue is summed inside
/// the store rather than by fetching every record here.
pub async fn admin_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let users = state.store.estimated_user_count()?;
    let menu_items = state.store.estimated_menu_count()?;
    let orders = state.store.estimated_payment_count()?;
    let revenue = state.store.sum_payment_prices()?;

    Ok(Json(StatsResponse {
        users,
        menu_items,
        orders,
        revenue,
    }))
}
