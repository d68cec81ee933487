//! Data Transfer Objects (DTOs).

mod author_dto;
mod music_dto;

pub use author_dto::*;
pub use music_dto::*;
