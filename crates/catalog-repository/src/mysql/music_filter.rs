//! Renders a [`MusicFilter`] as a SQL `WHERE` clause with bound parameters.

use catalog_core::{MusicFilter, MusicPredicate};
use sqlx::{MySql, QueryBuilder};

/// Appends ` WHERE p1 AND p2 ...` for the filter's predicates. Columns are
/// qualified with the `m` alias of the `musics` table. An unrestricted filter
/// appends nothing.
pub(crate) fn push_where(qb: &mut QueryBuilder<'_, MySql>, filter: &MusicFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            MusicPredicate::NameContains(needle) => {
                qb.push("LOWER(m.name) LIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
            MusicPredicate::GenreEquals(genre) => {
                qb.push("LOWER(m.genre) = ").push_bind(genre.clone());
            }
            MusicPredicate::AuthorIs(author_id) => {
                qb.push("m.author_id = ").push_bind(author_id.into_inner());
            }
            MusicPredicate::DurationAtLeast(min) => {
                qb.push("m.duration_seconds >= ").push_bind(*min);
            }
            MusicPredicate::DurationAtMost(max) => {
                qb.push("m.duration_seconds <= ").push_bind(*max);
            }
        }
    }
}

/// Escapes LIKE wildcards so the text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::MusicSearchCriteria;

    fn render(criteria: &MusicSearchCriteria) -> String {
        let mut qb = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM musics m");
        push_where(&mut qb, &MusicFilter::from_criteria(criteria));
        qb.sql().to_string()
    }

    #[test]
    fn test_unrestricted_filter_adds_no_where() {
        assert_eq!(
            render(&MusicSearchCriteria::default()),
            "SELECT COUNT(*) FROM musics m"
        );
    }

    #[test]
    fn test_all_predicates_are_anded() {
        let criteria = MusicSearchCriteria {
            name: Some("imag".to_string()),
            genre: Some("Rock".to_string()),
            author_id: Some(1),
            min_duration: Some(60),
            max_duration: Some(300),
        };
        assert_eq!(
            render(&criteria),
            "SELECT COUNT(*) FROM musics m WHERE LOWER(m.name) LIKE ? \
             AND LOWER(m.genre) = ? AND m.author_id = ? \
             AND m.duration_seconds >= ? AND m.duration_seconds <= ?"
        );
    }

    #[test]
    fn test_single_bound() {
        let criteria = MusicSearchCriteria {
            max_duration: Some(300),
            ..Default::default()
        };
        assert_eq!(
            render(&criteria),
            "SELECT COUNT(*) FROM musics m WHERE m.duration_seconds <= ?"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_real\\"), "100\\%\\_real\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
