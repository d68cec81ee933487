//! Entity-DTO mappers.

use crate::dto::{AuthorResponse, AuthorSummary, AuthorWithMusicsResponse, MusicResponse, MusicSummary};
use catalog_core::{AuthorWithMusicCount, AuthorWithMusics, Music, MusicWithAuthor};

impl From<AuthorWithMusicCount> for AuthorResponse {
    fn from(row: AuthorWithMusicCount) -> Self {
        let author = row.author;
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            music_count: row.music_count,
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

impl From<Music> for MusicSummary {
    fn from(music: Music) -> Self {
        Self {
            id: music.id,
            name: music.name,
            duration_seconds: music.duration_seconds,
            genre: music.genre,
        }
    }
}

impl From<AuthorWithMusics> for AuthorWithMusicsResponse {
    fn from(aggregate: AuthorWithMusics) -> Self {
        let author = aggregate.author;
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            musics: aggregate.musics.into_iter().map(MusicSummary::from).collect(),
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

impl From<MusicWithAuthor> for MusicResponse {
    fn from(row: MusicWithAuthor) -> Self {
        let music = row.music;
        Self {
            id: music.id,
            name: music.name,
            duration_seconds: music.duration_seconds,
            genre: music.genre,
            author: AuthorSummary {
                id: music.author_id,
                name: row.author_name,
            },
            created_at: music.created_at,
            updated_at: music.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Author, AuthorId, MusicId};
    use chrono::Utc;

    fn john() -> Author {
        let now = Utc::now();
        Author {
            id: AuthorId(1),
            name: "John Lennon".to_string(),
            email: "john@lennon.com".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn imagine() -> Music {
        let now = Utc::now();
        Music {
            id: MusicId(10),
            name: "Imagine".to_string(),
            duration_seconds: 183,
            genre: Some("Rock".to_string()),
            author_id: AuthorId(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_aggregate_to_response() {
        let response = AuthorWithMusicsResponse::from(AuthorWithMusics {
            author: john(),
            musics: vec![imagine()],
        });

        assert_eq!(response.id, AuthorId(1));
        assert_eq!(response.musics.len(), 1);
        assert_eq!(response.musics[0].name, "Imagine");
        assert_eq!(response.musics[0].duration_seconds, 183);
    }

    #[test]
    fn test_music_with_author_to_response() {
        let response = MusicResponse::from(MusicWithAuthor {
            music: imagine(),
            author_name: "John Lennon".to_string(),
        });

        assert_eq!(response.author.id, AuthorId(1));
        assert_eq!(response.author.name, "John Lennon");
        assert_eq!(response.genre.as_deref(), Some("Rock"));
    }
}
