//! User registration and role management handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use bistro_core::{Role, User, UserId};

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

/// User registration request.
#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    /// Email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// User registration response.
#[derive(Debug, Serialize)]
pub struct UpsertUserResponse {
    /// The new user's ID, or `null` when the email was already registered.
    pub inserted_id: Option<String>,
    /// Explanation when no insert happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// User response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Current role.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Register a user on first sign-in.
///
/// Insert-only-if-absent: a second registration for an email is reported
/// back without touching the existing record.
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpsertUserRequest>,
) -> Result<Json<UpsertUserResponse>, ApiError> {
    let user = User::new(body.email, body.name);

    match state.store.create_user_if_absent(&user)? {
        Some(id) => {
            tracing::info!(user_id = %id, email = %user.email, "User registered");
            Ok(Json(UpsertUserResponse {
                inserted_id: Some(id.to_string()),
                message: None,
            }))
        }
        None => Ok(Json(UpsertUserResponse {
            inserted_id: None,
            message: Some("user already exists".into()),
        })),
    }
}

/// List all users (admin only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users()?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Admin flag response.
#[derive(Debug, Serialize)]
pub struct AdminFlagResponse {
    /// Whether the user is an admin.
    pub admin: bool,
}

/// Report whether the caller is an admin.
///
/// Self-only: callers may ask about their own email and nobody else's.
pub async fn check_admin(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminFlagResponse>, ApiError> {
    auth.ensure_owns(&email)?;

    let admin = state
        .store
        .get_user_by_email(&email)?
        .is_some_and(|user| user.is_admin());

    Ok(Json(AdminFlagResponse { admin }))
}

/// Promote a user to admin (admin only).
pub async fn promote_admin(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id: UserId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid user id".into()))?;

    state.store.set_user_role(&user_id, Role::Admin)?;

    tracing::info!(user_id = %user_id, promoted_by = %admin.email, "User promoted to admin");

    Ok(Json(serde_json::json!({ "updated": true })))
}

/// Delete a user (admin only).
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id: UserId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid user id".into()))?;

    state.store.delete_user(&user_id)?;

    tracing::info!(user_id = %user_id, "User deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}
