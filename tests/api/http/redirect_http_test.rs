//! HSL redirect HTTP Handler Tests

use super::{build_test_router, get_json, get_raw, TestAppState};
use crate::api::{test_settings, TEST_ALGORITHM, TEST_BASE_URL, TEST_IV, TEST_KEY};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use wealth_core::crypto::{AesCbcCipher, SymmetricCipher};
use wealth_core::domain::RedirectUrl;

/// Pull the encrypted id out of a redirect URL and decrypt it
fn decrypt_id(redirect_url: &str) -> String {
    let prefix = format!("{}?id=", TEST_BASE_URL);
    let encoded = redirect_url
        .strip_prefix(&prefix)
        .expect("redirect URL should start with the base URL");
    let ciphertext = urlencoding::decode(encoded).unwrap();
    AesCbcCipher::new()
        .decrypt(&ciphertext, TEST_ALGORITHM, TEST_KEY, TEST_IV)
        .unwrap()
}

// ============================================================================
// Successful generation
// ============================================================================

#[tokio::test]
async fn test_get_redirect_url_returns_200() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/login").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert!(body.redirect_url.starts_with("https://redirect.example.com?id="));
    assert_eq!(decrypt_id(&body.redirect_url), "wealthapp05032024101530_login");
    assert_eq!(state.cipher.encrypt_calls(), 1);
}

#[tokio::test]
async fn test_response_uses_camel_case_field() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/hsl/login").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert!(body.get("redirectUrl").is_some());
    assert!(body.get("redirect_url").is_none());
}

#[tokio::test]
async fn test_redirect_id_is_percent_encoded() {
    let app = build_test_router(TestAppState::new());

    let (_, body): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/login").await;
    let url = body.unwrap().redirect_url;
    let id = url.split_once("?id=").unwrap().1;

    assert!(!id.contains('+'));
    assert!(!id.contains('/'));
    assert!(!id.contains('='));
}

#[tokio::test]
async fn test_tag_with_reserved_characters_survives_round_trip() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<RedirectUrl>) =
        get_json(&app, "/hsl/a%20b%26c%2Fd%3Fe").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decrypt_id(&body.unwrap().redirect_url),
        "wealthapp05032024101530_a b&c/d?e"
    );
}

#[tokio::test]
async fn test_identical_requests_at_same_instant_match() {
    let app = build_test_router(TestAppState::new());

    let (_, first): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/portfolio").await;
    let (_, second): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/portfolio").await;

    assert_eq!(first.unwrap(), second.unwrap());
}

#[tokio::test]
async fn test_different_tags_produce_different_urls() {
    let app = build_test_router(TestAppState::new());

    let (_, a): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/a").await;
    let (_, b): (StatusCode, Option<RedirectUrl>) = get_json(&app, "/hsl/b").await;

    assert_ne!(a.unwrap().redirect_url, b.unwrap().redirect_url);
}

// ============================================================================
// Configuration and encryption failures
// ============================================================================

#[tokio::test]
async fn test_empty_algorithm_returns_config_error() {
    let mut settings = test_settings();
    settings.cipher_algorithm = Some(String::new());
    let state = TestAppState::with_settings(settings);
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/hsl/login").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body.unwrap();
    assert_eq!(body["code"], "HSL_CONFIG_ERROR");
    assert_eq!(body["error"], "internal_error");
    assert_eq!(state.cipher.encrypt_calls(), 0);
}

#[tokio::test]
async fn test_missing_base_url_does_not_leak_setting_name() {
    let mut settings = test_settings();
    settings.base_url = None;
    let app = build_test_router(TestAppState::with_settings(settings));

    let (status, _, body) = get_raw(&app, "/hsl/login").await;
    let text = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.contains("HSL_CONFIG_ERROR"));
    assert!(!text.contains("HSL_REDIRECT_BASE_URL"));
}

#[tokio::test]
async fn test_unsupported_algorithm_returns_encryption_error() {
    let mut settings = test_settings();
    settings.cipher_algorithm = Some("des-ede3-cbc".to_string());
    let state = TestAppState::with_settings(settings);
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/hsl/login").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap()["code"], "HSL_ENCRYPTION_ERROR");
    assert_eq!(state.cipher.encrypt_calls(), 1);
}

#[tokio::test]
async fn test_bad_iv_length_returns_encryption_error() {
    let mut settings = test_settings();
    settings.cipher_iv = Some("short".to_string());
    let app = build_test_router(TestAppState::with_settings(settings));

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/hsl/login").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body.unwrap();
    assert_eq!(body["code"], "HSL_ENCRYPTION_ERROR");
    assert!(!body.to_string().contains(TEST_KEY));
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_missing_tag_returns_json_404() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/hsl/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "not_found");
}

#[tokio::test]
async fn test_post_is_not_allowed() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let app = build_test_router(TestAppState::new());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hsl/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
