//! Author-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{AuthorId, MusicId, NewAuthor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create or update an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(min = 2, max = 255, message = "Name must be between 2 and 255 characters")
    )]
    #[schema(example = "John Lennon")]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Email must be valid")
    )]
    #[schema(example = "john@lennon.com")]
    pub email: String,
}

impl AuthorRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl From<AuthorRequest> for NewAuthor {
    fn from(request: AuthorRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
        }
    }
}

/// Author response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    /// Number of musics owned by the author
    pub music_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Music entry inside an author aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicSummary {
    pub id: MusicId,
    pub name: String,
    pub duration_seconds: i32,
    pub genre: Option<String>,
}

/// An author with every music it owns. This is the cached representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithMusicsResponse {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    pub musics: Vec<MusicSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
