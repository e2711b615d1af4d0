//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert response is CSV
pub fn assert_csv(response: &TestResponse) {
    assert_ok(response);
    let content_type = response.header("content-type").unwrap_or_default();
    assert!(
        content_type.starts_with("text/csv"),
        "Expected Content-Type: text/csv, got {content_type:?}"
    );
}

/// Assert an error response with the given status and matching JSON body
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message string");
}

/// Assert a pattern creation response and return its JSON
pub fn assert_created_pattern(response: &TestResponse) -> serde_json::Value {
    assert_status(response, StatusCode::CREATED);
    let json: serde_json::Value = response.json();

    let id = json["id"].as_str().expect("Expected id string");
    assert_eq!(id.len(), 16, "Pattern id should be 16 hex characters");
    assert!(json["created_at"].is_string(), "Expected created_at timestamp");

    let pattern = &json["pattern"];
    assert!(pattern["grid"].is_array());
    assert!(pattern["colorMap"].is_object());
    assert!(pattern["colorCounts"].is_object());
    assert!(pattern["numColors"].is_u64());

    json
}
