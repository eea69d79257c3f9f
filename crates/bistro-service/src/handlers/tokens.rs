//! Credential issuance handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Identity payload submitted at sign-in.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Email to bind the credential to.
    pub email: String,
}

/// Issued credential.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The signed, time-bounded credential.
    pub token: String,
}

/// Issue a credential for a submitted identity payload.
///
/// The credential is stateless: nothing is stored server-side, and the
/// caller's role is decided at request time by the admin extractor, not
/// by anything signed here.
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = auth::sign_token(&body.email, state.config.jwt_secret.as_bytes())
        .map_err(|e| ApiError::Internal(format!("failed to sign credential: {e}")))?;

    Ok(Json(TokenResponse { token }))
}
