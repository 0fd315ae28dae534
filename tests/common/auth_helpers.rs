//! Authentication test helpers
//!
//! Provides utilities for registering test users through the API and
//! building request bodies for them.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use super::app::TestApp;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A registered user with live tokens
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Registration body with a valid profile
pub fn registration_body(email: &str, password: &str) -> Value {
    json!({
        "user_data": {
            "first_name": "Test",
            "last_name": "User",
            "age": 30,
            "bio": "Collects vintage cameras"
        },
        "credentials": { "email": email, "password": password }
    })
}

/// Register a user with a unique email and resolve its id
pub async fn register_user(app: &TestApp) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    register_user_with(app, &email, TEST_PASSWORD).await
}

pub async fn register_user_with(app: &TestApp, email: &str, password: &str) -> TestUser {
    let response = app
        .json(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(registration_body(email, password)),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "registration failed: {}",
        response.body
    );

    let access_token = token_field(response.message(), "access_token");
    let refresh_token = token_field(response.message(), "refresh_token");

    let current = app.get("/api/v1/auth/current", Some(&access_token)).await;
    let id = current.message()["id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .expect("current user has an id");

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        access_token,
        refresh_token,
    }
}

fn token_field(message: &Value, key: &str) -> String {
    message[key]
        .as_str()
        .unwrap_or_else(|| panic!("missing {key} in {message}"))
        .to_string()
}

/// A valid product body
pub fn product_body(name: &str, price: f64, quantity: i32, category: i64) -> Value {
    json!({
        "name": name,
        "price": price,
        "details": format!("{name}, barely used"),
        "quantity": quantity,
        "category": category
    })
}

/// List a product as `seller` and return its id
pub async fn create_product(app: &TestApp, seller: &TestUser, body: Value) -> Uuid {
    let response = app
        .json(
            Method::POST,
            "/api/v1/product/create",
            Some(&seller.access_token),
            Some(body),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "product creation failed: {}",
        response.body
    );
    response
        .message()
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .expect("create answers with the product id")
}
