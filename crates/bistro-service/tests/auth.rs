//! Credential issuance and verification integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn jwt_endpoint_issues_usable_token() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/jwt")
        .json(&json!({ "email": "alice@example.com" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // The issued token passes verification on a protected route.
    let response = harness
        .server
        .get("/users/admin/alice@example.com")
        .add_header("authorization", format!("Bearer {token}"))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn missing_credential_is_unauthorized() {
    let harness = TestHarness::new();

    let response = harness.server.get("/admin-stats").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn malformed_credential_is_unauthorized() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", "Bearer not-a-token")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", "Basic abc123")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn valid_credential_without_admin_role_is_forbidden() {
    let harness = TestHarness::new();
    harness.seed_user("bob@example.com");

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("bob@example.com"))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn credential_for_unknown_user_is_forbidden_on_admin_routes() {
    let harness = TestHarness::new();

    // The token is valid, but no user record exists for the email.
    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("ghost@example.com"))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn admin_role_is_read_from_store_not_credential() {
    let harness = TestHarness::new();
    let user = harness.seed_user("carol@example.com");

    // Same token before and after promotion; only the stored role changes.
    let token = harness.bearer("carol@example.com");

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", &token)
        .await;
    response.assert_status_forbidden();

    harness
        .store
        .set_user_role(&user.id, bistro_core::Role::Admin)
        .unwrap();

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", &token)
        .await;
    response.assert_status_ok();
}
