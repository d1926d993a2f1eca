//! Health, readiness and response header tests

use super::{build_test_router, get_json, get_raw, TestAppState};
use crate::api::test_settings;
use axum::http::StatusCode;
use wealth_core::api::health::HealthResponse;

#[tokio::test]
async fn test_health_returns_200() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<HealthResponse>) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_is_ok_even_when_unconfigured() {
    let app = build_test_router(TestAppState::with_settings(Default::default()));

    let (status, _, _) = get_raw(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ready_when_configured() {
    let app = build_test_router(TestAppState::new());

    let (status, _, body) = get_raw(&app, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ready");
}

#[tokio::test]
async fn test_not_ready_when_key_missing() {
    let mut settings = test_settings();
    settings.cipher_key = None;
    let app = build_test_router(TestAppState::with_settings(settings));

    let (status, _, body) = get_raw(&app, "/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"not_ready");
}

#[tokio::test]
async fn test_security_headers_on_responses() {
    let app = build_test_router(TestAppState::new());

    let (_, headers, _) = get_raw(&app, "/hsl/login").await;

    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers
        .get("cache-control")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("no-store"));
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = build_test_router(TestAppState::new());

    let (_, headers, _) = get_raw(&app, "/health").await;

    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_openapi_document_lists_redirect_path() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<serde_json::Value>) =
        get_json(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["paths"].get("/hsl/{tag}").is_some());
}
