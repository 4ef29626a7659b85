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

/// Assert response is a PDF download
pub fn assert_pdf(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_pdf(),
        "Expected PDF, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("application/pdf"),
        "Expected Content-Type: application/pdf"
    );
}

/// Assert a JSON error body with the given status.
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) -> serde_json::Value {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}. Full response: {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
    json
}

/// Assert a 400 response and return the paths of the reported fields
pub fn assert_validation_error(response: &TestResponse) -> Vec<String> {
    let json = assert_json_error(response, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Validation failed");
    json["errors"]
        .as_array()
        .expect("Expected an errors array")
        .iter()
        .map(|e| e["path"].as_str().unwrap_or_default().to_string())
        .collect()
}
