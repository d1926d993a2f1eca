//! HSL redirect URL generation
//!
//! Builds `wealthapp<DDMMYYYYHHmmss>_<tag>`, encrypts it with the configured
//! symmetric cipher and hands back `{base_url}?id={percent-encoded ciphertext}`.

use crate::config::{ConfigError, RedirectSettings};
use crate::crypto::{CipherError, SymmetricCipher};
use crate::domain::{RedirectConfig, RedirectUrl};
use crate::service::clock::Clock;
use chrono::NaiveDateTime;
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;

/// Literal prefix of every plaintext identifier
pub const TOKEN_PREFIX: &str = "wealthapp";

/// `DDMMYYYYHHmmss`, 24 hour clock
const TIMESTAMP_FORMAT: &str = "%d%m%Y%H%M%S";

/// Errors from redirect URL generation. Both kinds are terminal.
#[derive(Error, Debug)]
pub enum RedirectError {
    #[error("Redirect configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Redirect encryption error: {0}")]
    Encryption(#[from] CipherError),
}

impl RedirectError {
    /// Static code returned to callers for log correlation
    pub fn code(&self) -> &'static str {
        match self {
            RedirectError::Configuration(_) => "HSL_CONFIG_ERROR",
            RedirectError::Encryption(_) => "HSL_ENCRYPTION_ERROR",
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            RedirectError::Configuration(_) => "config_error",
            RedirectError::Encryption(_) => "encryption_error",
        }
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Plaintext identifier for `tag` at instant `at`. The tag is not escaped.
pub fn build_plaintext_id(at: NaiveDateTime, tag: &str) -> String {
    format!("{}{}_{}", TOKEN_PREFIX, format_timestamp(at), tag)
}

pub fn build_redirect_url(base_url: &str, ciphertext: &str) -> String {
    format!("{}?id={}", base_url, urlencoding::encode(ciphertext))
}

/// Service producing encrypted redirect URLs
pub struct RedirectService<C: SymmetricCipher, K: Clock> {
    config: Result<RedirectConfig, ConfigError>,
    cipher: Arc<C>,
    clock: Arc<K>,
}

impl<C: SymmetricCipher, K: Clock> RedirectService<C, K> {
    /// Create a service from raw settings.
    ///
    /// Invalid settings do not prevent construction; every call then fails
    /// with a configuration error without touching the cipher.
    pub fn new(settings: &RedirectSettings, cipher: Arc<C>, clock: Arc<K>) -> Self {
        let config = RedirectConfig::from_settings(settings);
        if let Err(e) = &config {
            tracing::warn!("HSL redirect service is not configured: {}", e);
        }
        Self {
            config,
            cipher,
            clock,
        }
    }

    /// Create a service from an already validated configuration
    pub fn with_config(config: RedirectConfig, cipher: Arc<C>, clock: Arc<K>) -> Self {
        Self {
            config: Ok(config),
            cipher,
            clock,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_ok()
    }

    /// Generate the redirect URL for `tag`
    pub fn get_redirect_url(&self, tag: &str) -> Result<RedirectUrl, RedirectError> {
        let result = self.generate(tag);
        match &result {
            Ok(_) => {
                counter!("wealth_redirect_urls_total", "result" => "success").increment(1);
                tracing::debug!(tag = %tag, "Generated HSL redirect URL");
            }
            Err(e) => {
                counter!("wealth_redirect_urls_total", "result" => e.metric_label()).increment(1);
            }
        }
        result
    }

    fn generate(&self, tag: &str) -> Result<RedirectUrl, RedirectError> {
        let config = self.config.as_ref().map_err(|e| e.clone())?;

        let plaintext = build_plaintext_id(self.clock.now(), tag);
        let ciphertext = self.cipher.encrypt(
            &plaintext,
            config.cipher_algorithm(),
            config.cipher_key(),
            config.cipher_iv(),
        )?;

        Ok(RedirectUrl {
            redirect_url: build_redirect_url(config.base_url(), &ciphertext),
        })
    }
}
