//! Wealth Core - Financial Backend Service
//!
//! This crate provides the HSL redirect endpoint of the wealth backend: it
//! builds time-stamped tokens, encrypts them with a configured AES-CBC key and
//! returns the external redirect URL carrying the encrypted token.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
