//! Admin statistics integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn revenue_is_zero_with_no_payments() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["revenue"], 0.0);
    assert_eq!(body["orders"], 0);
}

#[tokio::test]
async fn revenue_sums_all_payments_regardless_of_order() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");

    for price in [20.0, 10.0, 30.0] {
        let response = harness
            .server
            .post("/payments")
            .json(&json!({
                "email": "alice@example.com",
                "price": price,
                "charge_ref": "pi_stats",
                "cart_ids": []
            }))
            .await;
        response.assert_status_ok();
    }

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["revenue"], 60.0);
    assert_eq!(body["orders"], 3);
}

#[tokio::test]
async fn counts_reflect_the_live_collections() {
    let harness = TestHarness::new();
    harness.seed_admin("root@example.com");
    harness.seed_user("alice@example.com");

    for name in ["Margherita", "Tiramisu"] {
        let item = bistro_core::MenuItem::new(name, "", "", "misc", 9.0);
        harness.store.put_menu_item(&item).unwrap();
    }

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("root@example.com"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["users"], 2);
    assert_eq!(body["menu_items"], 2);
}

#[tokio::test]
async fn stats_are_admin_gated() {
    let harness = TestHarness::new();
    harness.seed_user("bob@example.com");

    let response = harness
        .server
        .get("/admin-stats")
        .add_header("authorization", harness.bearer("bob@example.com"))
        .await;

    response.assert_status_forbidden();
}
