//! Cache key generators for consistent key naming.

use catalog_core::AuthorId;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "music-catalog:cache";

/// Region holding author-with-musics aggregates.
pub const AUTHOR_MUSICS_REGION: &str = "authorMusics";

/// Key of the cached aggregate for one author.
#[must_use]
pub fn author_musics(prefix: &str, id: AuthorId) -> String {
    format!("{prefix}:{AUTHOR_MUSICS_REGION}:{id}")
}

/// Pattern matching every entry of the author-with-musics region.
#[must_use]
pub fn author_musics_region(prefix: &str) -> String {
    format!("{prefix}:{AUTHOR_MUSICS_REGION}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_musics_key() {
        let key = author_musics(DEFAULT_PREFIX, AuthorId(42));
        assert_eq!(key, "music-catalog:cache:authorMusics:42");
    }

    #[test]
    fn test_region_pattern_covers_keys() {
        let pattern = author_musics_region("test");
        assert_eq!(pattern, "test:authorMusics:*");

        let key = author_musics("test", AuthorId(7));
        assert!(key.starts_with(pattern.trim_end_matches('*')));
    }
}
