//! Authentication middleware and extractors.
//!
//! This module provides:
//! - `sign_token` / `decode_token` - HS256 credential issuance and
//!   verification
//! - `AuthUser` - extractor for any authenticated caller
//! - `AdminUser` - extractor for admin-only endpoints
//!
//! Credentials are self-contained and verified statelessly; the service
//! keeps no session state. Admin checks re-read the user's role from the
//! store on every request, so a long-lived credential can never carry a
//! stale or forged role.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// How long an issued credential stays valid.
const TOKEN_TTL_SECS: i64 = 3600; // 1 hour

/// JWT claims carried by a credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated caller.
    pub email: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration time (Unix seconds).
    pub exp: i64,
}

/// Sign a credential for the given email.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn sign_token(email: &str, secret: &[u8]) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

/// Decode and verify a credential, checking signature and expiry.
fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}

/// An authenticated caller extracted from a bearer credential.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The verified email of the caller.
    pub email: String,
}

impl AuthUser {
    /// Check that the caller is asking about their own data.
    ///
    /// Fails with `Forbidden` when the authenticated email differs from the
    /// email named in the request, independent of role.
    pub fn ensure_owns(&self, email: &str) -> Result<(), ApiError> {
        if self.email == email {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let claims =
                decode_token(token, state.config.jwt_secret.as_bytes()).map_err(|e| {
                    tracing::debug!(error = %e, "Credential verification failed");
                    ApiError::Unauthorized
                })?;

            Ok(AuthUser {
                email: claims.email,
            })
        })
    }
}

/// An authenticated admin.
///
/// Runs the `AuthUser` verification and then looks the caller up in the
/// store: no user record, or a role other than admin, is `Forbidden`. The
/// role inside the credential is never consulted.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The verified email of the admin.
    pub email: String,
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let auth =
                <AuthUser as FromRequestParts<Arc<AppState>>>::from_request_parts(parts, state)
                    .await?;

            // Always re-read the role from storage.
            let user = state.store.get_user_by_email(&auth.email)?;

            match user {
                Some(user) if user.is_admin() => Ok(AdminUser { email: auth.email }),
                _ => Err(ApiError::Forbidden),
            }
        })
    }
}
