//! API integration tests infrastructure
//!
//! Shared fixtures for exercising the redirect endpoint without touching the
//! process environment.


use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicUsize, Ordering};
use wealth_core::config::RedirectSettings;
use wealth_core::crypto::{AesCbcCipher, CipherError, SymmetricCipher};

pub const TEST_KEY: &str = "0123456789abcdef";
pub const TEST_IV: &str = "abcdef0123456789";
pub const TEST_ALGORITHM: &str = "aes-256-cbc";
pub const TEST_BASE_URL: &str = "https://redirect.example.com";

/// 2024-03-05 10:15:30, rendered as `05032024101530`
pub fn test_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(10, 15, 30)
        .unwrap()
}

/// Fully populated redirect settings
pub fn test_settings() -> RedirectSettings {
    RedirectSettings {
        network_env: Some("prod".to_string()),
        cipher_key: Some(TEST_KEY.to_string()),
        cipher_iv: Some(TEST_IV.to_string()),
        cipher_algorithm: Some(TEST_ALGORITHM.to_string()),
        base_url: Some(TEST_BASE_URL.to_string()),
    }
}

/// Real AES cipher that counts how often it is asked to encrypt
#[derive(Default)]
pub struct SpyCipher {
    inner: AesCbcCipher,
    encrypt_calls: AtomicUsize,
}

impl SpyCipher {
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }
}

impl SymmetricCipher for SpyCipher {
    fn encrypt(
        &self,
        plaintext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt(plaintext, algorithm, key, iv)
    }

    fn decrypt(
        &self,
        ciphertext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError> {
        self.inner.decrypt(ciphertext, algorithm, key, iv)
    }
}
