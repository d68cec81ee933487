//! Music-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{AuthorId, CatalogError, CatalogResult, MusicId, NewMusic};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create or update a music.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Music name is required"),
        length(min = 1, max = 255, message = "Music name must be between 1 and 255 characters")
    )]
    #[schema(example = "Imagine")]
    pub name: String,

    #[validate(
        required(message = "Duration is required"),
        range(min = 1, message = "Duration must be positive")
    )]
    #[schema(example = 183)]
    pub duration_seconds: Option<i32>,

    #[validate(length(max = 100, message = "Genre must be at most 100 characters"))]
    #[schema(example = "Rock")]
    pub genre: Option<String>,

    #[validate(required(message = "Author ID is required"))]
    #[schema(example = 1)]
    pub author_id: Option<i64>,
}

impl MusicRequest {
    /// Converts a validated request into insertable fields.
    pub fn into_new_music(self) -> CatalogResult<NewMusic> {
        let duration_seconds = self
            .duration_seconds
            .ok_or_else(|| CatalogError::validation("Duration is required"))?;
        let author_id = self
            .author_id
            .ok_or_else(|| CatalogError::validation("Author ID is required"))?;

        Ok(NewMusic {
            name: self.name,
            duration_seconds,
            genre: self.genre,
            author_id: AuthorId(author_id),
        })
    }
}

/// Owning author as shown inside a music response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub name: String,
}

/// Music response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponse {
    pub id: MusicId,
    pub name: String,
    pub duration_seconds: i32,
    pub genre: Option<String>,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ValidateExt;

    fn imagine() -> MusicRequest {
        MusicRequest {
            name: "Imagine".to_string(),
            duration_seconds: Some(183),
            genre: Some("Rock".to_string()),
            author_id: Some(1),
        }
    }

    fn messages(request: &MusicRequest) -> Vec<String> {
        match request.validate_request() {
            Ok(()) => vec![],
            Err(CatalogError::Validation { field_errors, .. }) => {
                field_errors.iter().map(|e| e.formatted()).collect()
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let request = imagine();
        assert!(messages(&request).is_empty());

        let music = request.into_new_music().unwrap();
        assert_eq!(music.author_id, AuthorId(1));
        assert_eq!(music.duration_seconds, 183);
    }

    #[test]
    fn test_missing_required_fields() {
        let request: MusicRequest = serde_json::from_str(r#"{"name": "Imagine"}"#).unwrap();
        assert_eq!(
            messages(&request),
            vec![
                "authorId: Author ID is required".to_string(),
                "durationSeconds: Duration is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_positive_duration() {
        let request = MusicRequest {
            duration_seconds: Some(0),
            ..imagine()
        };
        assert_eq!(
            messages(&request),
            vec!["durationSeconds: Duration must be positive".to_string()]
        );
    }

    #[test]
    fn test_genre_too_long() {
        let request = MusicRequest {
            genre: Some("x".repeat(101)),
            ..imagine()
        };
        assert_eq!(
            messages(&request),
            vec!["genre: Genre must be at most 100 characters".to_string()]
        );
    }

    #[test]
    fn test_blank_name() {
        let request = MusicRequest {
            name: "  ".to_string(),
            ..imagine()
        };
        assert_eq!(messages(&request), vec!["name: Music name is required".to_string()]);
    }
}
