//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{carts, health, menu, payments, reviews, stats, tokens, users};
use crate::state::AppState;

/// Maximum concurrent in-flight requests.
const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /jwt` - Issue a credential
/// - `GET /menu`, `GET /reviews` - Browse
/// - `GET/POST /carts`, `DELETE /carts/:id` - Cart CRUD
/// - `POST /users` - Register on first sign-in
/// - `POST /create-payment-intent` - Mint a charge intent
/// - `POST /payments` - Record a completed payment
///
/// ## Credential required
/// - `GET /users/admin/:email` - Own admin flag (self-only)
/// - `GET /payments/:email` - Own payment history (self-only)
///
/// ## Credential + admin role
/// - `GET /users`, `PATCH /users/:id/admin`, `DELETE /users/:id`
/// - `POST /menu`, `DELETE /menu/:id`
/// - `GET /admin-stats`
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Credentials
        .route("/jwt", post(tokens::issue_token))
        // Users
        .route("/users", get(users::list_users).post(users::upsert_user))
        .route("/users/admin/:email", get(users::check_admin))
        .route("/users/:id/admin", patch(users::promote_admin))
        .route("/users/:id", delete(users::delete_user))
        // Menu
        .route("/menu", get(menu::list_menu).post(menu::create_menu_item))
        .route("/menu/:id", delete(menu::delete_menu_item))
        // Reviews
        .route("/reviews", get(reviews::list_reviews))
        // Carts
        .route("/carts", get(carts::list_cart_items).post(carts::add_cart_item))
        .route("/carts/:id", delete(carts::delete_cart_item))
        // Payments
        .route("/create-payment-intent", post(payments::create_payment_intent))
        .route("/payments", post(payments::record_payment))
        .route("/payments/:email", get(payments::list_payments))
        // Stats
        .route("/admin-stats", get(stats::admin_stats))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
