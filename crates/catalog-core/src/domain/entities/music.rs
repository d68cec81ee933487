//! Music entity.

use crate::{AuthorId, MusicId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A music owned by exactly one author. `(name, author_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    /// Unique identifier, assigned by the database.
    pub id: MusicId,

    /// Title.
    pub name: String,

    /// Duration in seconds, always positive.
    pub duration_seconds: i32,

    /// Optional genre.
    pub genre: Option<String>,

    /// Owning author.
    pub author_id: AuthorId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Music {
    /// Applies new details and bumps the update timestamp.
    pub fn apply_update(&mut self, details: NewMusic) {
        self.name = details.name;
        self.duration_seconds = details.duration_seconds;
        self.genre = details.genre;
        self.author_id = details.author_id;
        self.updated_at = Utc::now();
    }
}

/// Fields needed to insert a new music.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMusic {
    pub name: String,
    pub duration_seconds: i32,
    pub genre: Option<String>,
    pub author_id: AuthorId,
}

/// A music joined with its owning author's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicWithAuthor {
    pub music: Music,
    pub author_name: String,
}
