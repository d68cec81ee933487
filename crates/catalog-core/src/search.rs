//! Music search criteria and the filter composed from them.
//!
//! Every criterion is optional. The composed [`MusicFilter`] is the logical
//! AND of the criteria that are present; absent ones impose no constraint,
//! so an empty criteria set matches every music.

use crate::{AuthorId, Music};
use serde::{Deserialize, Serialize};

/// Optional criteria accepted by the music search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "openapi",
    derive(utoipa::IntoParams),
    into_params(parameter_in = Query)
)]
#[serde(rename_all = "camelCase")]
pub struct MusicSearchCriteria {
    /// Case-insensitive substring of the music name
    pub name: Option<String>,
    /// Case-insensitive exact genre
    pub genre: Option<String>,
    /// Owning author
    pub author_id: Option<i64>,
    /// Inclusive lower bound on duration, in seconds
    pub min_duration: Option<i32>,
    /// Inclusive upper bound on duration, in seconds
    pub max_duration: Option<i32>,
}

/// One constraint of a music search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicPredicate {
    /// Lowercased name must contain this text.
    NameContains(String),
    /// Lowercased genre must equal this text.
    GenreEquals(String),
    AuthorIs(AuthorId),
    DurationAtLeast(i32),
    DurationAtMost(i32),
}

impl MusicPredicate {
    /// Evaluates the predicate against a music.
    #[must_use]
    pub fn matches(&self, music: &Music) -> bool {
        match self {
            Self::NameContains(needle) => music.name.to_lowercase().contains(needle.as_str()),
            Self::GenreEquals(genre) => music
                .genre
                .as_deref()
                .is_some_and(|g| g.to_lowercase() == *genre),
            Self::AuthorIs(author_id) => music.author_id == *author_id,
            Self::DurationAtLeast(min) => music.duration_seconds >= *min,
            Self::DurationAtMost(max) => music.duration_seconds <= *max,
        }
    }
}

/// Conjunction of predicates. Empty means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicFilter {
    predicates: Vec<MusicPredicate>,
}

impl MusicFilter {
    /// A filter that matches every music.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Composes a filter from optional criteria. Blank text criteria are ignored.
    #[must_use]
    pub fn from_criteria(criteria: &MusicSearchCriteria) -> Self {
        let mut predicates = Vec::new();

        if let Some(name) = non_blank(criteria.name.as_deref()) {
            predicates.push(MusicPredicate::NameContains(name.to_lowercase()));
        }
        if let Some(genre) = non_blank(criteria.genre.as_deref()) {
            predicates.push(MusicPredicate::GenreEquals(genre.to_lowercase()));
        }
        if let Some(author_id) = criteria.author_id {
            predicates.push(MusicPredicate::AuthorIs(AuthorId(author_id)));
        }
        if let Some(min) = criteria.min_duration {
            predicates.push(MusicPredicate::DurationAtLeast(min));
        }
        if let Some(max) = criteria.max_duration {
            predicates.push(MusicPredicate::DurationAtMost(max));
        }

        Self { predicates }
    }

    /// Restricts the filter further to one author.
    #[must_use]
    pub fn and_author(mut self, author_id: AuthorId) -> Self {
        self.predicates.push(MusicPredicate::AuthorIs(author_id));
        self
    }

    #[must_use]
    pub fn predicates(&self) -> &[MusicPredicate] {
        &self.predicates
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True when every predicate holds for `music`.
    #[must_use]
    pub fn matches(&self, music: &Music) -> bool {
        self.predicates.iter().all(|p| p.matches(music))
    }
}

impl From<&MusicSearchCriteria> for MusicFilter {
    fn from(criteria: &MusicSearchCriteria) -> Self {
        Self::from_criteria(criteria)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
