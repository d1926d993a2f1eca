//! Security headers middleware for REST API
//!
//! Redirect URLs carry encrypted identifiers, so every response is marked
//! non-cacheable and non-embeddable.

use crate::config::SecurityHeadersConfig;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

fn is_https(request: &Request<Body>, config: &SecurityHeadersConfig) -> bool {
    if !config.hsts_https_only {
        return true;
    }
    if request.uri().scheme_str() == Some("https") {
        return true;
    }
    config.hsts_trust_x_forwarded_proto
        && request
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("https"))
            .unwrap_or(false)
}

fn hsts_value(config: &SecurityHeadersConfig) -> String {
    let mut value = format!("max-age={}", config.hsts_max_age_secs);
    if config.hsts_include_subdomains {
        value.push_str("; includeSubDomains");
    }
    if config.hsts_preload {
        value.push_str("; preload");
    }
    value
}

/// Adds nosniff, frame, referrer, cache and CSP headers to every response,
/// plus HSTS for HTTPS requests when enabled.
pub async fn security_headers_middleware(
    State(config): State<SecurityHeadersConfig>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Must be decided before `request` moves into `next.run`
    let add_hsts = config.hsts_enabled && is_https(&request, &config);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    if add_hsts {
        if let Ok(value) = HeaderValue::from_str(&hsts_value(&config)) {
            headers.insert(header::STRICT_TRANSPORT_SECURITY, value);
        }
    }

    response
}
