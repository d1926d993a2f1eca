//! Cryptographic utilities for Wealth Core

pub mod aes;

pub use self::aes::{AesCbcCipher, CipherAlgorithm, CipherError, SymmetricCipher};
