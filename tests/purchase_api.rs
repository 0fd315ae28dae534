//! Purchase tests
//!
//! A cart is bought whole or not at all, and concurrent buyers never
//! oversubscribe stock.

#[macro_use]
mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

async fn buy(app: &TestApp, buyer: &TestUser, cart: Value) -> TestResponse {
    app.json(
        Method::POST,
        "/api/v1/product/buy",
        Some(&buyer.access_token),
        Some(cart),
    )
    .await
}

async fn stock(app: &TestApp, user: &TestUser, id: Uuid) -> i64 {
    let response = app
        .get(&format!("/api/v1/product/get/{id}"), Some(&user.access_token))
        .await;
    response.message()["quantity"].as_i64().expect("quantity")
}

#[tokio::test]
async fn test_buy_decrements_stock() {
    let app = TestApp::new();
    let seller = register_user(&app).await;
    let buyer = register_user(&app).await;
    let id = create_product(&app, &seller, product_body("Mug", 7.25, 5, 0)).await;

    let response = buy(&app, &buyer, json!({ id.to_string(): 2 })).await;

    assert_status!(response, StatusCode::OK);
    let receipt = response.message();
    assert_eq!(receipt["lines"][0]["product_id"], id.to_string());
    assert_eq!(receipt["lines"][0]["quantity"], 2);
    assert_approx_eq!(receipt["total"].as_f64().unwrap(), 14.5);
    assert_eq!(stock(&app, &buyer, id).await, 3);
}

#[tokio::test]
async fn test_buy_several_lines() {
    let app = TestApp::new();
    let seller = register_user(&app).await;
    let buyer = register_user(&app).await;
    let mug = create_product(&app, &seller, product_body("Mug", 5.0, 5, 0)).await;
    let plate = create_product(&app, &seller, product_body("Plate", 3.0, 4, 0)).await;

    let response = buy(
        &app,
        &buyer,
        json!({ mug.to_string(): 1, plate.to_string(): 4 }),
    )
    .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.message()["lines"].as_array().unwrap().len(), 2);
    assert_approx_eq!(response.message()["total"].as_f64().unwrap(), 17.0);
    assert_eq!(stock(&app, &buyer, mug).await, 4);
    assert_eq!(stock(&app, &buyer, plate).await, 0);
}

#[tokio::test]
async fn test_owner_cannot_buy() {
    let app = TestApp::new();
    let seller = register_user(&app).await;
    let id = create_product(&app, &seller, product_body("Mug", 5.0, 5, 0)).await;

    let response = buy(&app, &seller, json!({ id.to_string(): 1 })).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_contains!(response.message().as_str().unwrap(), "your own product");
    assert_eq!(stock(&app, &seller, id).await, 5);
}

#[tokio::test]
async fn test_insufficient_stock_leaves_cart_untouched() {
    let app = TestApp::new();
    let seller = register_user(&app).await;
    let buyer = register_user(&app).await;
    let plenty = create_product(&app, &seller, product_body("Spoon", 1.0, 10, 0)).await;
    let scarce = create_product(&app, &seller, product_body("Bowl", 9.0, 1, 0)).await;

    let response = buy(
        &app,
        &buyer,
        json!({ plenty.to_string(): 3, scarce.to_string(): 2 }),
    )
    .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_contains!(response.message().as_str().unwrap(), "not enough stock");
    assert_eq!(stock(&app, &buyer, plenty).await, 10);
    assert_eq!(stock(&app, &buyer, scarce).await, 1);
}

#[tokio::test]
async fn test_invalid_carts() {
    let app = TestApp::new();
    let seller = register_user(&app).await;
    let buyer = register_user(&app).await;
    let id = create_product(&app, &seller, product_body("Mug", 5.0, 5, 0)).await;

    let empty = buy(&app, &buyer, json!({})).await;
    assert_status!(empty, StatusCode::BAD_REQUEST);

    let zero = buy(&app, &buyer, json!({ id.to_string(): 0 })).await;
    assert_status!(zero, StatusCode::BAD_REQUEST);

    let negative = buy(&app, &buyer, json!({ id.to_string(): -1 })).await;
    assert_status!(negative, StatusCode::BAD_REQUEST);

    let bad_key = buy(&app, &buyer, json!({ "not-a-uuid": 1 })).await;
    assert_status!(bad_key, StatusCode::BAD_REQUEST);

    let unknown = buy(&app, &buyer, json!({ Uuid::new_v4().to_string(): 1 })).await;
    assert_status!(unknown, StatusCode::NOT_FOUND);

    assert_eq!(stock(&app, &buyer, id).await, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_buyers_of_last_unit() {
    let app = Arc::new(TestApp::new());
    let seller = register_user(&app).await;
    let id = create_product(&app, &seller, product_body("Last one", 99.0, 1, 0)).await;

    let mut buyers = Vec::new();
    for _ in 0..8 {
        buyers.push(register_user(&app).await);
    }

    let handles: Vec<_> = buyers
        .into_iter()
        .map(|buyer| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { buy(&app, &buyer, json!({ id.to_string(): 1 })).await.status })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::OK {
            succeeded += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(stock(&app, &seller, id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_buyers_never_oversubscribe() {
    let app = Arc::new(TestApp::new());
    let seller = register_user(&app).await;
    let id = create_product(&app, &seller, product_body("Batch", 2.0, 7, 0)).await;

    let mut buyers = Vec::new();
    for _ in 0..6 {
        buyers.push(register_user(&app).await);
    }

    // 6 buyers asking for 2 units each against 7 in stock: at most 3 win
    let handles: Vec<_> = buyers
        .into_iter()
        .map(|buyer| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { buy(&app, &buyer, json!({ id.to_string(): 2 })).await.status })
        })
        .collect();

    let mut sold = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::OK {
            sold += 2;
        }
    }

    assert_eq!(sold, 6);
    assert_eq!(stock(&app, &seller, id).await, 1);
}
