//! AES-CBC encryption for HSL redirect identifiers
//!
//! Ciphertext is PKCS#7 padded and emitted as standard base64 (with padding).
//! The downstream redirect endpoint decrypts with the same algorithm, key and
//! IV, so this encoding is part of the external contract.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Required IV length for every supported algorithm (AES block size)
pub const IV_LEN: usize = 16;

/// Cipher error types
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Unsupported cipher algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Cipher key must not be empty")]
    EmptyKey,

    #[error("Invalid IV: must be exactly 16 bytes, got {0}")]
    InvalidIvLength(usize),

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Invalid base64 encoding: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Decryption failed: invalid ciphertext or wrong key")]
    DecryptionFailed,
}

/// Symmetric cipher primitive used by the redirect service.
///
/// Algorithm, key and IV are passed per call so the primitive holds no
/// configuration of its own.
#[cfg_attr(test, mockall::automock)]
pub trait SymmetricCipher: Send + Sync {
    fn encrypt(
        &self,
        plaintext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError>;

    fn decrypt(
        &self,
        ciphertext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError>;
}

/// Supported block cipher modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl CipherAlgorithm {
    pub fn key_len(&self) -> usize {
        match self {
            CipherAlgorithm::Aes128Cbc => 16,
            CipherAlgorithm::Aes192Cbc => 24,
            CipherAlgorithm::Aes256Cbc => 32,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CipherAlgorithm::Aes128Cbc => "aes-128-cbc",
            CipherAlgorithm::Aes192Cbc => "aes-192-cbc",
            CipherAlgorithm::Aes256Cbc => "aes-256-cbc",
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-128-cbc" => Ok(CipherAlgorithm::Aes128Cbc),
            "aes-192-cbc" => Ok(CipherAlgorithm::Aes192Cbc),
            "aes-256-cbc" => Ok(CipherAlgorithm::Aes256Cbc),
            _ => Err(CipherError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Resolve key material to the exact key size of the algorithm.
///
/// Key strings of the right length are used as-is. Anything else is run
/// through SHA-256 and truncated to the key size.
fn derive_key(algorithm: CipherAlgorithm, key: &str) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return Err(CipherError::EmptyKey);
    }
    let raw = key.as_bytes();
    if raw.len() == algorithm.key_len() {
        return Ok(raw.to_vec());
    }
    let digest = Sha256::digest(raw);
    Ok(digest[..algorithm.key_len()].to_vec())
}

fn iv_bytes(iv: &str) -> Result<&[u8], CipherError> {
    let bytes = iv.as_bytes();
    if bytes.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(bytes.len()));
    }
    Ok(bytes)
}

fn encrypt_with<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: KeyIvInit + BlockEncryptMut,
{
    let cipher = C::new_from_slices(key, iv).map_err(|_| CipherError::EncryptionFailed)?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_with<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: KeyIvInit + BlockDecryptMut,
{
    C::new_from_slices(key, iv)
        .map_err(|_| CipherError::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::DecryptionFailed)
}

/// AES-CBC implementation of [`SymmetricCipher`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbcCipher;

impl AesCbcCipher {
    pub fn new() -> Self {
        Self
    }
}

impl SymmetricCipher for AesCbcCipher {
    fn encrypt(
        &self,
        plaintext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError> {
        let algorithm: CipherAlgorithm = algorithm.parse()?;
        let key = derive_key(algorithm, key)?;
        let iv = iv_bytes(iv)?;

        let ciphertext = match algorithm {
            CipherAlgorithm::Aes128Cbc => {
                encrypt_with::<cbc::Encryptor<aes::Aes128>>(&key, iv, plaintext.as_bytes())?
            }
            CipherAlgorithm::Aes192Cbc => {
                encrypt_with::<cbc::Encryptor<aes::Aes192>>(&key, iv, plaintext.as_bytes())?
            }
            CipherAlgorithm::Aes256Cbc => {
                encrypt_with::<cbc::Encryptor<aes::Aes256>>(&key, iv, plaintext.as_bytes())?
            }
        };

        Ok(BASE64.encode(ciphertext))
    }

    fn decrypt(
        &self,
        ciphertext: &str,
        algorithm: &str,
        key: &str,
        iv: &str,
    ) -> Result<String, CipherError> {
        let algorithm: CipherAlgorithm = algorithm.parse()?;
        let key = derive_key(algorithm, key)?;
        let iv = iv_bytes(iv)?;
        let ciphertext = BASE64.decode(ciphertext)?;

        let plaintext = match algorithm {
            CipherAlgorithm::Aes128Cbc => {
                decrypt_with::<cbc::Decryptor<aes::Aes128>>(&key, iv, &ciphertext)?
            }
            CipherAlgorithm::Aes192Cbc => {
                decrypt_with::<cbc::Decryptor<aes::Aes192>>(&key, iv, &ciphertext)?
            }
            CipherAlgorithm::Aes256Cbc => {
                decrypt_with::<cbc::Decryptor<aes::Aes256>>(&key, iv, &ciphertext)?
            }
        };

        String::from_utf8(plaintext).map_err(|_| CipherError::DecryptionFailed)
    }
}
