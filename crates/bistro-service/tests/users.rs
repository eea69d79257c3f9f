//! User registration and role management integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn registration_inserts_once_per_email() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/users")
        .json(&json!({ "email": "alice@example.com", "name": "Alice" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["inserted_id"].is_string());

    // Second sign-in with the same email is a no-op.
    let response = harness
        .server
        .post("/users")
        .json(&json!({ "email": "alice@example.com", "name": "Alice Again" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["inserted_id"].is_null());
    assert_eq!(body["message"], "user already exists");
}

#[tokio::test]
async fn admin_flag_is_self_only() {
    let harness = TestHarness::new();
    harness.seed_user("alice@example.com");

    let response = harness
        .server
        .get("/users/admin/alice@example.com")
        .add_header("authorization", harness.bearer("bob@example.com"))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn admin_flag_reflects_stored_role() {
    let harness = TestHarness::new();
    harness.seed_admin("alice@example.com");
    harness.seed_user("bob@example.com");

    let response = harness
        .server
        .get("/users/admin/alice@example.com")
        .add_header("authorization", harness.bearer("alice@example.com"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["admin"], true);

    let response = harness
        .server
        .get("/users/admin/bob@example.com")
        .add_header("authorization", harness.bearer("bob@example.com"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["admin"], false);
}

#[tokio::test]
async fn listing_users_requires_admin() {
    let harness = TestHarness::new();
    harness.seed_user("bob@example.com");

    let response = harness
        .server
        .get("/users")
        .add_header("authorization", harness.bearer("bob@example.com"))
        .await;
    response.assert_status_forbidden();

    harness.seed_admin("root@example.com");

    let response = harness
        .server
        .get("/users")
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn promotion_opens_the_admin_gate() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");
    let carol = harness.seed_user("carol@example.com");

    let response = harness
        .server
        .patch(&format!("/users/{}/admin", carol.id))
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;
    response.assert_status_ok();

    // Carol's existing credential now clears the admin check.
    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("carol@example.com"))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn promotion_of_unknown_user_is_not_found() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");

    let response = harness
        .server
        .patch(&format!("/users/{}/admin", bistro_core::UserId::generate()))
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn deleting_a_user_frees_the_email() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");
    let bob = harness.seed_user("bob@example.com");

    let response = harness
        .server
        .delete(&format!("/users/{}", bob.id))
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;
    response.assert_status_ok();

    assert!(harness
        .store
        .get_user_by_email("bob@example.com")
        .unwrap()
        .is_none());
}
