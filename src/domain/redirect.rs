//! HSL redirect domain types

use crate::config::{
    ConfigError, RedirectSettings, CIPHER_ALGORITHM_VAR, CIPHER_IV_VAR, CIPHER_KEY_VAR,
    NETWORK_ENV_VAR, REDIRECT_BASE_URL_VAR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Validated configuration for the redirect service.
///
/// All five values are guaranteed non-empty once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct RedirectConfig {
    network_env: String,
    cipher_key: String,
    cipher_iv: String,
    cipher_algorithm: String,
    base_url: String,
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

impl RedirectConfig {
    pub fn new(
        network_env: impl Into<String>,
        cipher_key: impl Into<String>,
        cipher_iv: impl Into<String>,
        cipher_algorithm: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_settings(&RedirectSettings {
            network_env: Some(network_env.into()),
            cipher_key: Some(cipher_key.into()),
            cipher_iv: Some(cipher_iv.into()),
            cipher_algorithm: Some(cipher_algorithm.into()),
            base_url: Some(base_url.into()),
        })
    }

    /// Validate raw settings. Fails on the first missing or blank value.
    ///
    /// Values are kept verbatim; whitespace is significant in key material.
    pub fn from_settings(settings: &RedirectSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            network_env: required(&settings.network_env, NETWORK_ENV_VAR)?,
            cipher_key: required(&settings.cipher_key, CIPHER_KEY_VAR)?,
            cipher_iv: required(&settings.cipher_iv, CIPHER_IV_VAR)?,
            cipher_algorithm: required(&settings.cipher_algorithm, CIPHER_ALGORITHM_VAR)?,
            base_url: required(&settings.base_url, REDIRECT_BASE_URL_VAR)?,
        })
    }

    pub fn network_env(&self) -> &str {
        &self.network_env
    }

    pub fn cipher_key(&self) -> &str {
        &self.cipher_key
    }

    pub fn cipher_iv(&self) -> &str {
        &self.cipher_iv
    }

    pub fn cipher_algorithm(&self) -> &str {
        &self.cipher_algorithm
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for RedirectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectConfig")
            .field("network_env", &self.network_env)
            .field("cipher_key", &"[REDACTED]")
            .field("cipher_iv", &"[REDACTED]")
            .field("cipher_algorithm", &self.cipher_algorithm)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Response body for `GET /hsl/{tag}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUrl {
    /// Base redirect URL with the encrypted identifier as the `id` query parameter
    pub redirect_url: String,
}
