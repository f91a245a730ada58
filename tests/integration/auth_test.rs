//! Integration tests for authentication flow.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Ayse Yilmaz",
                "email": "Ayse@Test.com",
                "password": "password123",
                "phone_number": "+90 555 000 0000",
                "user_type": "shelter_volunteer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let user = &response.body["data"]["user"];
    assert_eq!(user["email"], "ayse@test.com");
    assert_eq!(user["user_type"], "shelter_volunteer");
    assert!(user.get("password_hash").is_none());
    assert_eq!(response.body["data"]["token"]["token_type"], "bearer");
}

#[tokio::test]
async fn test_register_accepts_role_alias() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Mehmet Kaya",
                "email": "mehmet@test.com",
                "password": "password123",
                "role": "donor",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["user"]["user_type"], "donor");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new();
    app.register("dup@test.com", "donor").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Someone Else",
                "email": "DUP@test.com",
                "password": "password123",
                "user_type": "recipient",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Short Password",
                "email": "not-an-email",
                "password": "123",
                "user_type": "donor",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.register("login@test.com", "recipient").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({
                "email": "login@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["token"]["access_token"].is_string());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new();
    app.register("login@test.com", "recipient").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({
                "email": "login@test.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({
                "email": "nobody@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = helpers::TestApp::new();
    let (user_id, token) = app.register("me@test.com", "donor").await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user_id.as_str());
    assert_eq!(response.body["data"]["email"], "me@test.com");
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = helpers::TestApp::new();

    let missing = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHENTICATED");

    let garbage = app.request("GET", "/auth/me", None, Some("garbage")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}
