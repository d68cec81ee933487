//! # Catalog Server Library
//!
//! Dependency injection, logging setup and startup utilities for the
//! music catalog server binary.

pub mod di;
pub mod logging;
pub mod startup;
