//! Configuration management for Wealth Core

use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;

pub const NETWORK_ENV_VAR: &str = "NETWORK_ENV";
pub const CIPHER_KEY_VAR: &str = "HSL_CIPHER_KEY";
pub const CIPHER_IV_VAR: &str = "HSL_CIPHER_IV";
pub const CIPHER_ALGORITHM_VAR: &str = "HSL_CIPHER_ALGORITHM";
pub const REDIRECT_BASE_URL_VAR: &str = "HSL_REDIRECT_BASE_URL";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment ("production", "staging", "development", ...)
    pub environment: String,
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Raw HSL redirect settings, validated into `RedirectConfig` at startup
    pub redirect: RedirectSettings,
    /// Logging, tracing and metrics
    pub telemetry: TelemetryConfig,
    /// Security response headers
    pub security_headers: SecurityHeadersConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Configuration errors raised while validating settings.
///
/// The variable name is kept for logs only; it never reaches an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required setting {0} is missing or empty")]
    Missing(&'static str),
}

/// HSL redirect settings as read from the environment.
///
/// Every field is optional here; `RedirectConfig::from_settings` decides
/// whether the redirect service can run.
#[derive(Clone, Default)]
pub struct RedirectSettings {
    pub network_env: Option<String>,
    pub cipher_key: Option<String>,
    pub cipher_iv: Option<String>,
    pub cipher_algorithm: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for RedirectSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("RedirectSettings")
            .field("network_env", &self.network_env)
            .field("cipher_key", &redacted(&self.cipher_key))
            .field("cipher_iv", &redacted(&self.cipher_iv))
            .field("cipher_algorithm", &self.cipher_algorithm)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
    pub metrics_enabled: bool,
    pub tracing_enabled: bool,
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            tracing_enabled: false,
            otlp_endpoint: None,
            service_name: "wealth-core".to_string(),
        }
    }
}

/// Security headers configuration
#[derive(Debug, Clone)]
pub struct SecurityHeadersConfig {
    pub hsts_enabled: bool,
    /// Only emit HSTS when the request arrived over HTTPS
    pub hsts_https_only: bool,
    /// Treat `X-Forwarded-Proto: https` as HTTPS (behind a TLS-terminating proxy)
    pub hsts_trust_x_forwarded_proto: bool,
    pub hsts_max_age_secs: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_enabled: true,
            hsts_https_only: true,
            hsts_trust_x_forwarded_proto: true,
            hsts_max_age_secs: 31_536_000,
            hsts_include_subdomains: true,
            hsts_preload: false,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Allowed origins; empty or `["*"]` means any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            http_host: var_or("HTTP_HOST", "0.0.0.0"),
            http_port: var_or("HTTP_PORT", "8080")
                .parse()
                .context("Invalid HTTP_PORT")?,
            redirect: RedirectSettings {
                network_env: lookup(NETWORK_ENV_VAR),
                cipher_key: lookup(CIPHER_KEY_VAR),
                cipher_iv: lookup(CIPHER_IV_VAR),
                cipher_algorithm: lookup(CIPHER_ALGORITHM_VAR),
                base_url: lookup(REDIRECT_BASE_URL_VAR),
            },
            telemetry: TelemetryConfig {
                log_format: var_or("LOG_FORMAT", "pretty"),
                metrics_enabled: parse_bool(lookup("METRICS_ENABLED"), true),
                tracing_enabled: parse_bool(lookup("OTEL_TRACING_ENABLED"), false),
                otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT"),
                service_name: var_or("OTEL_SERVICE_NAME", "wealth-core"),
            },
            security_headers: SecurityHeadersConfig {
                hsts_enabled: parse_bool(lookup("HSTS_ENABLED"), true),
                hsts_https_only: parse_bool(lookup("HSTS_HTTPS_ONLY"), true),
                hsts_trust_x_forwarded_proto: parse_bool(
                    lookup("HSTS_TRUST_X_FORWARDED_PROTO"),
                    true,
                ),
                hsts_max_age_secs: var_or("HSTS_MAX_AGE_SECS", "31536000")
                    .parse()
                    .context("Invalid HSTS_MAX_AGE_SECS")?,
                ..SecurityHeadersConfig::default()
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(|o| o.trim().to_string())
                            .filter(|o| !o.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }
}
