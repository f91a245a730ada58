//! Integration tests for the reservation lifecycle.

mod helpers;

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_reserve_is_idempotent_for_holder() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (recipient_id, recipient) = app.register("recipient@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}/reserve");

    let first = app.request("POST", &path, None, Some(&recipient)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["is_reserved"], true);
    assert_eq!(first.body["data"]["reserved_by"], recipient_id.as_str());

    let again = app.request("POST", &path, None, Some(&recipient)).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["data"]["reserved_by"], recipient_id.as_str());
}

#[tokio::test]
async fn test_reserve_held_by_other_party_conflicts() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, first) = app.register("first@test.com", "recipient").await;
    let (_, second) = app.register("second@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}/reserve");

    app.request("POST", &path, None, Some(&first)).await;
    let response = app.request("POST", &path, None, Some(&second)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_reserve_requires_authentication() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;

    let response = app
        .request("POST", &format!("/donations/{id}/reserve"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reserve_unknown_donation() {
    let app = helpers::TestApp::new();
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;

    let response = app
        .request(
            "POST",
            "/donations/00000000-0000-0000-0000-000000000000/reserve",
            None,
            Some(&recipient),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_by_holder_and_donor() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    let reserve = format!("/donations/{id}/reserve");
    let cancel = format!("/donations/{id}/cancel_reservation");

    app.request("POST", &reserve, None, Some(&recipient)).await;
    let by_holder = app.request("POST", &cancel, None, Some(&recipient)).await;
    assert_eq!(by_holder.status, StatusCode::OK);
    assert_eq!(by_holder.body["data"]["is_reserved"], false);
    assert!(by_holder.body["data"]["reserved_by"].is_null());

    app.request("POST", &reserve, None, Some(&recipient)).await;
    let by_donor = app.request("POST", &cancel, None, Some(&donor)).await;
    assert_eq!(by_donor.status, StatusCode::OK);
    assert_eq!(by_donor.body["data"]["is_reserved"], false);
}

#[tokio::test]
async fn test_cancel_by_third_party_is_forbidden() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;
    let (_, stranger) = app.register("stranger@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;

    app.request("POST", &format!("/donations/{id}/reserve"), None, Some(&recipient))
        .await;
    let response = app
        .request(
            "POST",
            &format!("/donations/{id}/cancel_reservation"),
            None,
            Some(&stranger),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_without_reservation_conflicts() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/donations/{id}/cancel_reservation"),
            None,
            Some(&donor),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_collected_donation_is_terminal() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}");

    app.request("POST", &format!("{path}/reserve"), None, Some(&recipient))
        .await;

    let not_owner = app
        .request("PATCH", &path, Some(json!({ "is_collected": true })), Some(&recipient))
        .await;
    assert_eq!(not_owner.status, StatusCode::FORBIDDEN);

    let collected = app
        .request("PATCH", &path, Some(json!({ "is_collected": true })), Some(&donor))
        .await;
    assert_eq!(collected.status, StatusCode::OK);
    assert_eq!(collected.body["data"]["is_collected"], true);

    let reopen = app
        .request("PATCH", &path, Some(json!({ "is_collected": false })), Some(&donor))
        .await;
    assert_eq!(reopen.status, StatusCode::BAD_REQUEST);

    let cancel = app
        .request(
            "POST",
            &format!("{path}/cancel_reservation"),
            None,
            Some(&recipient),
        )
        .await;
    assert_eq!(cancel.status, StatusCode::BAD_REQUEST);

    let reserve = app
        .request("POST", &format!("{path}/reserve"), None, Some(&recipient))
        .await;
    assert_eq!(reserve.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_patch_releases_reservation() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}");

    app.request("POST", &format!("{path}/reserve"), None, Some(&recipient))
        .await;

    let released = app
        .request("PATCH", &path, Some(json!({ "is_reserved": false })), Some(&donor))
        .await;
    assert_eq!(released.status, StatusCode::OK);
    assert_eq!(released.body["data"]["is_reserved"], false);
    assert!(released.body["data"]["reserved_by"].is_null());

    let direct_reserve = app
        .request("PATCH", &path, Some(json!({ "is_reserved": true })), Some(&donor))
        .await;
    assert_eq!(direct_reserve.status, StatusCode::BAD_REQUEST);
    assert_eq!(direct_reserve.error_code(), "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_have_single_winner() {
    let app = Arc::new(helpers::TestApp::new());
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let id = app
        .create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;

    let mut tokens = Vec::new();
    for i in 0..8 {
        let (_, token) = app
            .register(&format!("recipient{i}@test.com"), "recipient")
            .await;
        tokens.push(token);
    }

    let handles: Vec<_> = tokens
        .into_iter()
        .map(|token| {
            let app = Arc::clone(&app);
            let path = format!("/donations/{id}/reserve");
            tokio::spawn(async move { app.request("POST", &path, None, Some(&token)).await })
        })
        .collect();

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in futures::future::join_all(handles).await {
        let response = handle.expect("task panicked");
        match response.status {
            StatusCode::OK => winners += 1,
            StatusCode::BAD_REQUEST => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 7);
}
