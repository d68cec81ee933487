//! Translation of API sort properties into whitelisted orderings.

use catalog_core::{CatalogError, CatalogResult, Sort};

/// Sortable author properties and their columns.
pub(crate) const AUTHOR_COLUMNS: &[(&str, &str)] = &[
    ("id", "a.id"),
    ("name", "a.name"),
    ("email", "a.email"),
    ("createdAt", "a.created_at"),
    ("updatedAt", "a.updated_at"),
];

/// Sortable music properties and their columns.
pub(crate) const MUSIC_COLUMNS: &[(&str, &str)] = &[
    ("id", "m.id"),
    ("name", "m.name"),
    ("durationSeconds", "m.duration_seconds"),
    ("genre", "m.genre"),
    ("createdAt", "m.created_at"),
    ("updatedAt", "m.updated_at"),
];

/// Builds an `ORDER BY` body for `sort`, with the id column as tie-breaker so
/// pages are stable. Unknown properties are rejected.
pub(crate) fn order_by(sort: &Sort, columns: &[(&str, &str)]) -> CatalogResult<String> {
    let column = columns
        .iter()
        .find(|(property, _)| *property == sort.property)
        .map(|(_, column)| *column)
        .ok_or_else(|| {
            let allowed: Vec<&str> = columns.iter().map(|(p, _)| *p).collect();
            CatalogError::validation(format!(
                "Cannot sort by '{}'. Sortable properties: {}",
                sort.property,
                allowed.join(", ")
            ))
        })?;

    let id_column = columns[0].1;
    if column == id_column {
        Ok(format!("{column} {}", sort.direction.as_sql()))
    } else {
        Ok(format!("{column} {}, {id_column} ASC", sort.direction.as_sql()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_name_with_id_tie_breaker() {
        assert_eq!(
            order_by(&Sort::default(), AUTHOR_COLUMNS).unwrap(),
            "a.name ASC, a.id ASC"
        );
    }

    #[test]
    fn test_descending_music_sort() {
        assert_eq!(
            order_by(&Sort::desc("durationSeconds"), MUSIC_COLUMNS).unwrap(),
            "m.duration_seconds DESC, m.id ASC"
        );
    }

    #[test]
    fn test_sort_by_id_has_no_tie_breaker() {
        assert_eq!(order_by(&Sort::desc("id"), MUSIC_COLUMNS).unwrap(), "m.id DESC");
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let err = order_by(&Sort::asc("name; DROP TABLE authors"), AUTHOR_COLUMNS).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = order_by(&Sort::asc("durationSeconds"), AUTHOR_COLUMNS).unwrap_err();
        assert!(err.to_string().contains("durationSeconds"));
    }
}
