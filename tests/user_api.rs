//! User API tests

#[macro_use]
mod common;

use axum::http::{Method, StatusCode};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

fn profile_update(first_name: &str) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": "Hopper",
        "age": 45,
        "phone_number": "+1 555 0100",
        "bio": "Rear admiral, compiler author"
    })
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let owner = register_user(&app).await;
    let viewer = register_user(&app).await;

    let response = app
        .get(&format!("/api/v1/user/get/{}", owner.id), Some(&viewer.access_token))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.message()["id"], owner.id.to_string());
}

#[tokio::test]
async fn test_get_user_bad_and_unknown_id() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let bad = app
        .get("/api/v1/user/get/not-a-uuid", Some(&user.access_token))
        .await;
    assert_status!(bad, StatusCode::BAD_REQUEST);

    let unknown = app
        .get(
            &format!("/api/v1/user/get/{}", Uuid::new_v4()),
            Some(&user.access_token),
        )
        .await;
    assert_status!(unknown, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let response = app
        .json(
            Method::PUT,
            "/api/v1/user/update",
            Some(&user.access_token),
            Some(profile_update("Grace")),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let profile = response.message();
    assert_eq!(profile["id"], user.id.to_string());
    assert_eq!(profile["first_name"], "Grace");
    assert_eq!(profile["age"], 45);
    // An omitted contact email keeps the stored one
    assert_eq!(profile["contact_email"], user.email);
    assert_eq!(profile["credits"], 0.0);
}

#[tokio::test]
async fn test_update_cannot_raise_credits() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let mut body = profile_update("Grace");
    body["credits"] = json!(1_000_000.0);
    let response = app
        .json(Method::PUT, "/api/v1/user/update", Some(&user.access_token), Some(body))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.message()["credits"], 0.0);
}

#[tokio::test]
async fn test_update_other_profile_is_unauthorized() {
    let app = TestApp::new();
    let victim = register_user(&app).await;
    let attacker = register_user(&app).await;

    let mut body = profile_update("Mallory");
    body["id"] = json!(victim.id);
    let response = app
        .json(
            Method::PUT,
            "/api/v1/user/update",
            Some(&attacker.access_token),
            Some(body),
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let unchanged = app
        .get(&format!("/api/v1/user/get/{}", victim.id), Some(&victim.access_token))
        .await;
    assert_eq!(unchanged.message()["first_name"], "Test");
}

#[tokio::test]
async fn test_update_invalid_profile_is_unprocessable() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let mut body = profile_update("Grace");
    body["age"] = json!(101);
    let invalid = app
        .json(Method::PUT, "/api/v1/user/update", Some(&user.access_token), Some(body))
        .await;
    assert_status!(invalid, StatusCode::UNPROCESSABLE_ENTITY);

    let malformed = app
        .raw(
            Method::PUT,
            "/api/v1/user/update",
            Some(&user.access_token),
            "application/json",
            "{\"first_name\": 7}",
        )
        .await;
    assert_status!(malformed, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let response = app
        .json(Method::DELETE, "/api/v1/user/delete", Some(&user.access_token), None)
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);
    assert!(response.raw.is_empty());

    let login = app
        .json(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": user.email, "password": user.password })),
        )
        .await;
    assert_status!(login, StatusCode::NOT_FOUND);

    let current = app.get("/api/v1/auth/current", Some(&user.access_token)).await;
    assert_status!(current, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_email_can_register_again() {
    let app = TestApp::new();
    let user = register_user(&app).await;
    app.json(Method::DELETE, "/api/v1/user/delete", Some(&user.access_token), None)
        .await;

    let again = register_user_with(&app, &user.email, TEST_PASSWORD).await;
    assert_ne!(again.id, user.id);
}

#[tokio::test]
async fn test_profile_picture_upload_and_download() {
    let app = TestApp::new();
    let user = register_user(&app).await;
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let response = app
        .upload(
            "/api/v1/user/image/upload",
            &user.access_token,
            &[("profile_picture", "me.png", png)],
        )
        .await;
    assert_status!(response, StatusCode::OK);
    let url = format!("{BASE_URL}/api/v1/user/image/{}", user.id);
    assert_eq!(response.message(), url.as_str());

    let profile = app.get("/api/v1/auth/current", Some(&user.access_token)).await;
    assert_eq!(profile.message()["profile_picture"], url.as_str());

    // Served without a token
    let image = app.get(&format!("/api/v1/user/image/{}", user.id), None).await;
    assert_status!(image, StatusCode::OK);
    assert_eq!(image.raw, png);
}

#[tokio::test]
async fn test_profile_picture_missing() {
    let app = TestApp::new();
    let user = register_user(&app).await;

    let wrong_field = app
        .upload(
            "/api/v1/user/image/upload",
            &user.access_token,
            &[("avatar", "me.png", b"bytes".as_slice())],
        )
        .await;
    assert_status!(wrong_field, StatusCode::BAD_REQUEST);

    let never_uploaded = app
        .get(&format!("/api/v1/user/image/{}", user.id), None)
        .await;
    assert_status!(never_uploaded, StatusCode::NOT_FOUND);
}
