//! Service components.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `author_service.rs`).

pub mod author_service_impl;
pub mod music_service_impl;

pub use author_service_impl::{
    AuthorServiceComponent, AuthorServiceComponentParameters, DEFAULT_AUTHOR_MUSICS_TTL,
};
pub use music_service_impl::MusicServiceComponent;
