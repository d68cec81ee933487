//! # Catalog REST
//!
//! REST API layer using Axum for the music catalog.
//! Provides HTTP endpoints for authors, musics, search and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
