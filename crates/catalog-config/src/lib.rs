//! # Catalog Config
//!
//! Configuration management for the music catalog.
//! Supports layered configuration from files and environment variables,
//! validated once at startup.

mod app_config;
mod loader;
pub mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::{format_validation_errors, ConfigValidationError, ConfigValidator};
