//! Domain entities for the music catalog.

pub mod entities;

pub use entities::*;
