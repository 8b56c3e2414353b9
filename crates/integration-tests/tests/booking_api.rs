//! Integration tests for the public booking endpoint and page.
//!
//! These run against an unreachable database: validation failures must be
//! answered before any query, and a valid submission surfaces as a storage
//! error.

use axum::http::{StatusCode, header};
use serde_json::json;

use gigbook_integration_tests::{
    TestConfig, body_json, body_text, get, offline_app, post_json, post_raw, send,
};

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_email_is_rejected() {
    let app = offline_app(&TestConfig::default());

    let response = send(&app, post_json("/api/booking", &json!({ "name": "Ana" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "ok": false, "error": "Name and email are required." }));
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = offline_app(&TestConfig::default());

    let response = send(
        &app,
        post_json(
            "/api/booking",
            &json!({ "name": "   ", "email": "a@x.com", "details": "Friday night" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name and email are required.");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = offline_app(&TestConfig::default());

    let response = send(
        &app,
        post_raw("/api/booking", "application/json", "{not json"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Invalid request body.");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = offline_app(&TestConfig::default());

    let response = send(&app, post_json("/api/booking", &json!("Ana <a@x.com>"))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["ok"], false);
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected() {
    let app = offline_app(&TestConfig::default());

    let response = send(
        &app,
        post_raw("/api/booking", "text/plain", r#"{"name":"Ana","email":"a@x.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Storage failure
// =============================================================================

#[tokio::test]
async fn test_storage_failure_returns_generic_500() {
    let app = offline_app(&TestConfig::default());

    let response = send(
        &app,
        post_json(
            "/api/booking",
            &json!({ "name": "Ana", "email": "a@x.com", "eventDate": "2025-06-01" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "ok": false, "error": "Internal server error" }));
}

// =============================================================================
// Public page
// =============================================================================

#[tokio::test]
async fn test_home_page_serves_form() {
    let app = offline_app(&TestConfig::default());

    let response = send(&app, get("/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap_or_default()
            .starts_with("text/html")
    );
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
    let html = body_text(response).await;
    assert!(html.contains(r#"id="booking-form""#));
}

#[tokio::test]
async fn test_booking_script_is_served() {
    let app = offline_app(&TestConfig::default());

    let response = send(&app, get("/static/js/booking.js", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/api/booking"));
}

#[tokio::test]
async fn test_api_responses_are_not_cached() {
    let app = offline_app(&TestConfig::default());

    let response = send(&app, post_json("/api/booking", &json!({}))).await;

    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store, max-age=0");
}
