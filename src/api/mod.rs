//! REST API handlers

pub mod health;
pub mod metrics;
pub mod redirect;
