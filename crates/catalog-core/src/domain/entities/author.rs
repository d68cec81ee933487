//! Author entity.

use super::Music;
use crate::AuthorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author of musics. Email is unique across all authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier, assigned by the database.
    pub id: AuthorId,

    /// Display name.
    pub name: String,

    /// Contact email, unique.
    pub email: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// Applies new details and bumps the update timestamp.
    pub fn apply_update(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Returns true if `email` is this author's email, ignoring case.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Fields needed to insert a new author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
}

/// An author together with every music it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorWithMusics {
    pub author: Author,
    pub musics: Vec<Music>,
}

/// An author with the number of musics it owns, used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorWithMusicCount {
    pub author: Author,
    pub music_count: u64,
}
