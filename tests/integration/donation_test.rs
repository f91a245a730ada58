//! Integration tests for donation listing, CRUD, and visibility.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_donation() {
    let app = helpers::TestApp::new();
    let (donor_id, token) = app.register("donor@test.com", "donor").await;

    let id = app
        .create_donation(&token, "Fresh bread", "clean food", 41.0082, 28.9784)
        .await;

    let response = app.request("GET", &format!("/donations/{id}"), None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["title"], "Fresh bread");
    assert_eq!(data["category"], "clean food");
    assert_eq!(data["donor_id"], donor_id.as_str());
    assert_eq!(data["latitude"], 41.0082);
    assert_eq!(data["longitude"], 28.9784);
    assert_eq!(data["is_reserved"], false);
    assert_eq!(data["is_collected"], false);
    assert!(data["reserved_by"].is_null());
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/donations",
            Some(json!({
                "title": "Soup",
                "category": "clean food",
                "latitude": 41.0,
                "longitude": 29.0,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_create_rejects_invalid_payload() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;

    let empty_title = app
        .request(
            "POST",
            "/donations",
            Some(json!({
                "title": "",
                "category": "clean food",
                "latitude": 41.0,
                "longitude": 29.0,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(empty_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_title.error_code(), "VALIDATION_ERROR");

    let bad_latitude = app
        .request(
            "POST",
            "/donations",
            Some(json!({
                "title": "Soup",
                "category": "clean food",
                "latitude": 91.0,
                "longitude": 29.0,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_latitude.status, StatusCode::BAD_REQUEST);

    let bad_category = app
        .request(
            "POST",
            "/donations",
            Some(json!({
                "title": "Soup",
                "category": "dessert",
                "latitude": 41.0,
                "longitude": 29.0,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_category.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_accepts_legacy_category_label() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;

    let id = app
        .create_donation(&token, "Bones", "atık yemek", 41.0, 29.0)
        .await;

    let response = app.request("GET", &format!("/donations/{id}"), None, None).await;
    assert_eq!(response.body["data"]["category"], "waste food");
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let app = helpers::TestApp::new();

    let missing = app
        .request(
            "GET",
            "/donations/00000000-0000-0000-0000-000000000000",
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "NOT_FOUND");

    let malformed = app.request("GET", "/donations/not-a-uuid", None, None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_anonymous_returns_all_newest_first() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;

    let first = app
        .create_donation(&token, "Rice", "clean food", 41.0, 29.0)
        .await;
    let second = app
        .create_donation(&token, "Peels", "waste food", 41.0, 29.0)
        .await;

    let response = app.request("GET", "/donations", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "2 donations found");
    let ids: Vec<&str> = response
        .items()
        .iter()
        .filter_map(|d| d["id"].as_str())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn test_list_filters_by_category() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;
    app.create_donation(&token, "Rice", "clean food", 41.0, 29.0)
        .await;
    app.create_donation(&token, "Peels", "waste food", 41.0, 29.0)
        .await;

    let response = app
        .request("GET", "/donations?category=waste%20food", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "1 donation found");
    assert_eq!(response.items()[0]["title"], "Peels");

    let invalid = app
        .request("GET", "/donations?category=dessert", None, None)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_overrides_requested_category() {
    let app = helpers::TestApp::new();
    let (_, donor) = app.register("donor@test.com", "donor").await;
    let (_, recipient) = app.register("recipient@test.com", "recipient").await;
    let (_, volunteer) = app
        .register("volunteer@test.com", "shelter_volunteer")
        .await;
    app.create_donation(&donor, "Rice", "clean food", 41.0, 29.0)
        .await;
    app.create_donation(&donor, "Peels", "waste food", 41.0, 29.0)
        .await;

    let as_recipient = app
        .request(
            "GET",
            "/donations?category=waste%20food",
            None,
            Some(&recipient),
        )
        .await;
    assert_eq!(as_recipient.status, StatusCode::OK);
    assert_eq!(as_recipient.items().len(), 1);
    assert_eq!(as_recipient.items()[0]["category"], "clean food");

    let as_volunteer = app.request("GET", "/donations", None, Some(&volunteer)).await;
    assert_eq!(as_volunteer.items().len(), 1);
    assert_eq!(as_volunteer.items()[0]["category"], "waste food");

    let as_donor = app.request("GET", "/donations", None, Some(&donor)).await;
    assert_eq!(as_donor.items().len(), 2);
}

#[tokio::test]
async fn test_list_with_invalid_token_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/donations", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nearby_search_respects_radius() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;
    app.create_donation(&token, "Simit", "clean food", 41.01, 28.98)
        .await;
    app.create_donation(&token, "Far away", "clean food", 39.9334, 32.8597)
        .await;

    let within_km = app
        .request(
            "GET",
            "/donations?latitude=41.0105&longitude=28.9801&radius_km=1",
            None,
            None,
        )
        .await;
    assert_eq!(within_km.status, StatusCode::OK);
    assert_eq!(within_km.items().len(), 1);
    assert_eq!(within_km.items()[0]["title"], "Simit");

    let within_meter = app
        .request(
            "GET",
            "/donations?latitude=41.0105&longitude=28.9801&radius_km=0.001",
            None,
            None,
        )
        .await;
    assert_eq!(within_meter.status, StatusCode::OK);
    assert!(within_meter.items().is_empty());
    assert_eq!(within_meter.body["message"], "No nearby donations found");
}

#[tokio::test]
async fn test_nearby_search_uses_default_radius() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;
    // Roughly 3.3 km north of the search center.
    app.create_donation(&token, "Close enough", "clean food", 41.04, 28.98)
        .await;
    // Roughly 11 km north.
    app.create_donation(&token, "Too far", "clean food", 41.11, 28.98)
        .await;

    let response = app
        .request("GET", "/donations?latitude=41.01&longitude=28.98", None, None)
        .await;

    assert_eq!(response.items().len(), 1);
    assert_eq!(response.items()[0]["title"], "Close enough");
}

#[tokio::test]
async fn test_partial_coordinates_fall_back_to_plain_listing() {
    let app = helpers::TestApp::new();
    let (_, token) = app.register("donor@test.com", "donor").await;
    app.create_donation(&token, "Far away", "clean food", 39.9334, 32.8597)
        .await;

    let response = app
        .request("GET", "/donations?latitude=41.01&radius_km=0.001", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);
    assert_eq!(response.body["message"], "1 donation found");
}

#[tokio::test]
async fn test_nearby_search_rejects_bad_parameters() {
    let app = helpers::TestApp::new();

    let bad_radius = app
        .request(
            "GET",
            "/donations?latitude=41.01&longitude=28.98&radius_km=-1",
            None,
            None,
        )
        .await;
    assert_eq!(bad_radius.status, StatusCode::BAD_REQUEST);

    let bad_latitude = app
        .request("GET", "/donations?latitude=120&longitude=28.98", None, None)
        .await;
    assert_eq!(bad_latitude.status, StatusCode::BAD_REQUEST);

    let not_a_number = app
        .request("GET", "/donations?latitude=north&longitude=28.98", None, None)
        .await;
    assert_eq!(not_a_number.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_by_owner_and_stranger() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.register("donor@test.com", "donor").await;
    let (_, stranger) = app.register("other@test.com", "donor").await;
    let id = app
        .create_donation(&owner, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}");

    let forbidden = app
        .request("PATCH", &path, Some(json!({ "title": "Mine now" })), Some(&stranger))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let forbidden_invalid = app
        .request("PATCH", &path, Some(json!({ "title": "" })), Some(&stranger))
        .await;
    assert_eq!(forbidden_invalid.status, StatusCode::FORBIDDEN);

    let updated = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "title": "Rice and beans", "quantity": null })),
            Some(&owner),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["title"], "Rice and beans");
    assert!(updated.body["data"]["quantity"].is_null());

    let invalid = app
        .request("PATCH", &path, Some(json!({ "title": "" })), Some(&owner))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_by_stranger_is_forbidden_for_malformed_fields() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.register("donor@test.com", "donor").await;
    let (_, stranger) = app.register("other@test.com", "recipient").await;
    let id = app
        .create_donation(&owner, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}");

    for body in [
        json!({ "category": "gold" }),
        json!({ "title": 5 }),
        json!({ "is_reserved": "yes" }),
    ] {
        let response = app
            .request("PATCH", &path, Some(body.clone()), Some(&stranger))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "body: {body}");
        assert_eq!(response.error_code(), "FORBIDDEN");
    }

    let owner_response = app
        .request("PATCH", &path, Some(json!({ "category": "gold" })), Some(&owner))
        .await;
    assert_eq!(owner_response.status, StatusCode::BAD_REQUEST);
    assert_eq!(owner_response.error_code(), "VALIDATION_ERROR");

    let unchanged = app.request("GET", &path, None, None).await;
    assert_eq!(unchanged.body["data"]["category"], "clean food");
}

#[tokio::test]
async fn test_update_accepts_category_in_any_case() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.register("donor@test.com", "donor").await;
    let id = app
        .create_donation(&owner, "Rice", "Clean Food", 41.0, 29.0)
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/donations/{id}"),
            Some(json!({ "category": "WASTE_FOOD" })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["category"], "waste food");
}

#[tokio::test]
async fn test_delete_by_owner_only() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.register("donor@test.com", "donor").await;
    let (_, stranger) = app.register("other@test.com", "recipient").await;
    let id = app
        .create_donation(&owner, "Rice", "clean food", 41.0, 29.0)
        .await;
    let path = format!("/donations/{id}");

    let forbidden = app.request("DELETE", &path, None, Some(&stranger)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_fall_back_to_all_when_empty() {
    let app = helpers::TestApp::new();

    let empty = app.request("GET", "/donations/categories", None, None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"], json!(["clean food", "waste food"]));

    let (_, token) = app.register("donor@test.com", "donor").await;
    app.create_donation(&token, "Peels", "waste food", 41.0, 29.0)
        .await;

    let used = app.request("GET", "/donations/categories", None, None).await;
    assert_eq!(used.body["data"], json!(["waste food"]));
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
}
