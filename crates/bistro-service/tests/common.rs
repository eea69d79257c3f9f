//! Common test utilities for bistro integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use bistro_core::{CartItem, MenuItemId, Role, User};
use bistro_service::{auth, create_router, AppState, ServiceConfig};
use bistro_store::{RocksStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// Direct store handle for seeding and assertions.
    pub store: Arc<dyn Store>,
    /// The configuration the server was built with.
    pub config: ServiceConfig,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and no Stripe.
    pub fn new() -> Self {
        Self::with_config(test_config(None))
    }

    /// Create a harness whose Stripe client talks to the given API double.
    pub fn with_stripe(stripe_base: &str) -> Self {
        Self::with_config(test_config(Some(stripe_base.to_string())))
    }

    fn with_config(config: ServiceConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store: Arc<dyn Store> =
            Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let state = AppState::new(Arc::clone(&store), config.clone());
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            store,
            config,
        }
    }

    /// Get the authorization header value for the given email.
    pub fn bearer(&self, email: &str) -> String {
        let token = auth::sign_token(email, self.config.jwt_secret.as_bytes())
            .expect("Failed to sign token");
        format!("Bearer {token}")
    }

    /// Seed a user with the default role.
    pub fn seed_user(&self, email: &str) -> User {
        let user = User::new(email, None);
        self.store
            .create_user_if_absent(&user)
            .expect("Failed to seed user");
        user
    }

    /// Seed a user with the admin role.
    pub fn seed_admin(&self, email: &str) -> User {
        let mut user = User::new(email, None);
        user.role = Role::Admin;
        self.store
            .create_user_if_absent(&user)
            .expect("Failed to seed admin");
        user
    }

    /// Seed a cart item for the given owner and return its id.
    pub fn seed_cart_item(&self, email: &str, price: f64) -> String {
        let item = CartItem::new(
            email,
            MenuItemId::generate(),
            "Caesar Salad",
            "salad.png",
            price,
        );
        self.store
            .put_cart_item(&item)
            .expect("Failed to seed cart item");
        item.id.to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn test_config(stripe_base: Option<String>) -> ServiceConfig {
    ServiceConfig {
        jwt_secret: "test-secret".into(),
        stripe_api_key: stripe_base.as_ref().map(|_| "sk_test_local".into()),
        stripe_api_base: stripe_base,
        ..ServiceConfig::default()
    }
}
