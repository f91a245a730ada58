//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use foodshare_api::{AppState, build_app};
use foodshare_core::config::{AppConfig, StoreBackend};
use foodshare_database::Stores;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores backing the router, for direct inspection
    pub stores: Stores,
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let stores = Stores::in_memory();
        let state = AppState::new(config, stores.clone()).expect("Failed to build app state");
        let router = build_app(state);

        Self { router, stores }
    }

    /// Register a user and return `(user_id, access_token)`
    pub async fn register(&self, email: &str, user_type: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(json!({
                    "full_name": "Test User",
                    "email": email,
                    "password": "password123",
                    "user_type": user_type,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        let user_id = response.body["data"]["user"]["id"]
            .as_str()
            .expect("No user id in register response")
            .to_string();
        let token = response.body["data"]["token"]["access_token"]
            .as_str()
            .expect("No access_token in register response")
            .to_string();
        (user_id, token)
    }

    /// Create a donation as the token's owner and return its ID
    pub async fn create_donation(
        &self,
        token: &str,
        title: &str,
        category: &str,
        latitude: f64,
        longitude: f64,
    ) -> String {
        let response = self
            .request(
                "POST",
                "/donations",
                Some(json!({
                    "title": title,
                    "category": category,
                    "quantity": "3 portions",
                    "latitude": latitude,
                    "longitude": longitude,
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` array of a listing response
    pub fn items(&self) -> &Vec<Value> {
        self.body["data"].as_array().expect("data is not an array")
    }

    /// The machine-readable error code
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
