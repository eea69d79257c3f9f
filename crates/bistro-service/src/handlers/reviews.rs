//! Review handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use bistro_core::Review;

use crate::error::ApiError;
use crate::state::AppState;

/// List all reviews.
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.store.list_reviews()?))
}
