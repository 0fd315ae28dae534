//! Test application
//!
//! Builds the full router over the in-memory store with a cheap bcrypt cost
//! and a temporary upload directory, and sends requests through it without
//! binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use emporium::backend::server::{
    config::{ServerConfig, MIN_BCRYPT_COST},
    create_app_with_stores,
};
use emporium::backend::storage::Stores;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://market.test";

/// A response with its body parsed as JSON (`Value::Null` when empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Vec<u8>,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the envelope
    pub fn message(&self) -> &Value {
        &self.body["message"]
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestApp {
    router: Router,
    uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let config = ServerConfig::builder()
            .jwt_secret("integration-test-secret")
            .bcrypt_cost(MIN_BCRYPT_COST)
            .upload_dir(uploads.path())
            .public_base_url(BASE_URL)
            .build();

        Self {
            router: create_app_with_stores(config, Stores::in_memory()),
            uploads,
        }
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        self.uploads.path()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            raw,
            body,
        }
    }

    /// Send a JSON request, optionally authenticated
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.json(Method::GET, uri, token, None).await
    }

    /// Send a raw body with an explicit content type
    pub async fn raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        content_type: &str,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(body.into()).expect("Failed to build request"))
            .await
    }

    /// Send a `multipart/form-data` upload of `(field, file name, bytes)` parts
    pub async fn upload(
        &self,
        uri: &str,
        token: &str,
        parts: &[(&str, &str, &[u8])],
    ) -> TestResponse {
        let (content_type, body) = multipart_body(parts);
        self.raw(Method::POST, uri, Some(token), &content_type, body)
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

const BOUNDARY: &str = "emporium-test-boundary";

pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (field, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
