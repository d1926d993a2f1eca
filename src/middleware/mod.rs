//! HTTP middleware for Wealth Core
//!
//! - JSON normalization of framework error responses
//! - Request ID propagation and HTTP metrics
//! - Security headers
//! - Log-safe request spans

pub mod error_response;
pub mod metrics;
pub mod security_headers;
pub mod trace;

pub use error_response::normalize_error_response;
pub use self::metrics::ObservabilityLayer;
pub use security_headers::security_headers_middleware;
pub use trace::SanitizedMakeSpan;
