//! Database row representations and their conversion into entities.

use catalog_core::{
    Author, AuthorId, AuthorWithMusicCount, CatalogError, Music, MusicId, MusicWithAuthor,
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Musics joined with their author's name.
pub(crate) const MUSIC_WITH_AUTHOR_SELECT: &str = "SELECT m.id, m.name, m.duration_seconds, \
     m.genre, m.author_id, m.created_at, m.updated_at, a.name AS author_name \
     FROM musics m JOIN authors a ON a.id = m.author_id";

#[derive(Debug, FromRow)]
pub(crate) struct AuthorRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId(row.id),
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct AuthorWithCountRow {
    #[sqlx(flatten)]
    author: AuthorRow,
    music_count: i64,
}

impl From<AuthorWithCountRow> for AuthorWithMusicCount {
    fn from(row: AuthorWithCountRow) -> Self {
        AuthorWithMusicCount {
            author: row.author.into(),
            music_count: u64::try_from(row.music_count).unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MusicRow {
    id: i64,
    name: String,
    duration_seconds: i32,
    genre: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MusicRow> for Music {
    fn from(row: MusicRow) -> Self {
        Music {
            id: MusicId(row.id),
            name: row.name,
            duration_seconds: row.duration_seconds,
            genre: row.genre,
            author_id: AuthorId(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MusicWithAuthorRow {
    #[sqlx(flatten)]
    music: MusicRow,
    author_name: String,
}

impl From<MusicWithAuthorRow> for MusicWithAuthor {
    fn from(row: MusicWithAuthorRow) -> Self {
        MusicWithAuthor {
            music: row.music.into(),
            author_name: row.author_name,
        }
    }
}

/// Converts the auto-increment id reported by MySQL after an insert.
pub(crate) fn inserted_id(last_insert_id: u64) -> Result<i64, CatalogError> {
    i64::try_from(last_insert_id)
        .map_err(|_| CatalogError::internal(format!("Inserted id out of range: {last_insert_id}")))
}
