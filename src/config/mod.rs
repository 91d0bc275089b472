//! # bytepool Configuration Module
//!
//! Centralizes all configuration constants for the crate. Constants are
//! grouped by functional area in [`constants`] and their interdependencies
//! are documented there rather than scattered across the modules that
//! consume them.

pub mod constants;
pub use constants::*;
