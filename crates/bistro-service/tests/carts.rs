//! Cart CRUD integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn cart_listing_is_owner_scoped() {
    let harness = TestHarness::new();

    for (email, price) in [
        ("alice@example.com", 12.5),
        ("alice@example.com", 8.0),
        ("bob@example.com", 15.0),
    ] {
        let response = harness
            .server
            .post("/carts")
            .json(&json!({
                "email": email,
                "menu_item_id": bistro_core::MenuItemId::generate().to_string(),
                "name": "Margherita",
                "image": "pizza.png",
                "price": price
            }))
            .await;
        response.assert_status_ok();
    }

    let response = harness.server.get("/carts?email=alice@example.com").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = harness.server.get("/carts?email=bob@example.com").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_one_cart_item() {
    let harness = TestHarness::new();

    let id = harness.seed_cart_item("alice@example.com", 10.0);
    harness.seed_cart_item("alice@example.com", 12.0);

    let response = harness.server.delete(&format!("/carts/{id}")).await;
    response.assert_status_ok();

    let response = harness.server.get("/carts?email=alice@example.com").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_missing_cart_item_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .delete(&format!("/carts/{}", bistro_core::CartItemId::generate()))
        .await;

    response.assert_status_not_found();
}
