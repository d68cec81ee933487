//! MySQL repository implementations.

mod author_repository;
mod music_filter;
mod music_repository;
mod rows;

pub use author_repository::MySqlAuthorRepository;
pub use music_repository::MySqlMusicRepository;
