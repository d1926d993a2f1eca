//! Custom TraceLayer span maker that sanitizes sensitive query parameters.
//!
//! Keeps encrypted redirect identifiers and other secrets out of application
//! logs by redacting known sensitive query parameter values.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values must be redacted in logs.
const SENSITIVE_PARAMS: &[&str] = &[
    "id",
    "key",
    "iv",
    "token",
    "access_token",
    "code",
    "password",
    "api_key",
];

/// A `MakeSpan` implementation that redacts sensitive query parameters from the
/// logged URI.
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method();
        let uri = request.uri();
        let sanitized = sanitize_uri(uri);

        tracing::info_span!(
            "request",
            method = %method,
            uri = %sanitized,
            version = ?request.version(),
        )
    }
}

/// Sanitize a URI by redacting the values of sensitive query parameters.
///
/// Example: `/callback?id=Zm9v%2B&source=app`
/// becomes: `/callback?id=[REDACTED]&source=app`
fn sanitize_uri(uri: &axum::http::Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let pairs: Vec<String> = query.split('&').map(redact_pair).collect();
    format!("{}?{}", uri.path(), pairs.join("&"))
}

fn redact_pair(pair: &str) -> String {
    match pair.split_once('=') {
        Some((key, _)) if is_sensitive(key) => format!("{key}=[REDACTED]"),
        _ => pair.to_string(),
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_PARAMS.iter().any(|s| key.eq_ignore_ascii_case(s))
}
