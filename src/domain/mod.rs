//! Domain models for Wealth Core

pub mod redirect;

pub use redirect::*;
