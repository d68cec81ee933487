//! # Catalog Service
//!
//! Business logic for the music catalog: author and music use cases, request
//! and response DTOs, and the cache that fronts author-with-musics reads.

pub mod author_service;
pub mod cache;
pub mod components;
pub mod dto;
pub mod mappers;
pub mod music_service;

pub use author_service::*;
pub use cache::*;
pub use components::*;
pub use dto::*;
pub use music_service::*;
