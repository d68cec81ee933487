//! MySQL author repository implementation.

use super::rows::{inserted_id, AuthorRow, AuthorWithCountRow, MusicRow};
use crate::sort::{self, AUTHOR_COLUMNS};
use crate::{traits::AuthorRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{
    Author, AuthorId, AuthorWithMusicCount, AuthorWithMusics, CatalogError, CatalogResult,
    NewAuthor, Page, PageRequest,
};
use chrono::Utc;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// MySQL author repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = AuthorRepository)]
pub struct MySqlAuthorRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlAuthorRepository {
    /// Creates a new MySQL author repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for MySqlAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> CatalogResult<Option<Author>> {
        debug!("Finding author by id: {}", id);

        let row = sqlx::query_as::<_, AuthorRow>(
            r"
            SELECT a.id, a.name, a.email, a.created_at, a.updated_at
            FROM authors a
            WHERE a.id = ?
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn exists_by_id(&self, id: AuthorId) -> CatalogResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM authors WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> CatalogResult<bool> {
        let result: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM authors WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn find_with_musics(&self, id: AuthorId) -> CatalogResult<Option<AuthorWithMusics>> {
        debug!("Loading author with musics: {}", id);

        // One transaction so the author and its musics come from the same snapshot.
        let mut tx = self.pool.inner().begin().await?;

        let author = sqlx::query_as::<_, AuthorRow>(
            r"
            SELECT a.id, a.name, a.email, a.created_at, a.updated_at
            FROM authors a
            WHERE a.id = ?
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(author) = author else {
            tx.commit().await?;
            return Ok(None);
        };

        let musics = sqlx::query_as::<_, MusicRow>(
            r"
            SELECT m.id, m.name, m.duration_seconds, m.genre, m.author_id,
                   m.created_at, m.updated_at
            FROM musics m
            WHERE m.author_id = ?
            ORDER BY m.id
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(AuthorWithMusics {
            author: author.into(),
            musics: musics.into_iter().map(Into::into).collect(),
        }))
    }

    async fn count_musics(&self, id: AuthorId) -> CatalogResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM musics WHERE author_id = ?")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count.unsigned_abs())
    }

    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<AuthorWithMusicCount>> {
        debug!(
            "Finding all authors, page: {}, size: {}, sort: {}",
            page.page, page.size, page.sort
        );

        let order_by = sort::order_by(&page.sort, AUTHOR_COLUMNS)?;
        let offset = page.offset()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(self.pool.inner())
            .await?;

        let sql = format!(
            r"
            SELECT a.id, a.name, a.email, a.created_at, a.updated_at,
                   (SELECT COUNT(*) FROM musics m WHERE m.author_id = a.id) AS music_count
            FROM authors a
            ORDER BY {order_by}
            LIMIT ? OFFSET ?
            "
        );

        let rows = sqlx::query_as::<_, AuthorWithCountRow>(&sql)
            .bind(page.limit() as i64)
            .bind(offset)
            .fetch_all(self.pool.inner())
            .await?;

        let authors = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(authors, page.page, page.size, total.unsigned_abs()))
    }

    async fn save(&self, author: &NewAuthor) -> CatalogResult<Author> {
        debug!("Saving new author: {}", author.email);

        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO authors (name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(&author.name)
        .bind(&author.email)
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        // MySQL doesn't support RETURNING, so insert then select
        let id = AuthorId(inserted_id(result.last_insert_id())?);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::internal("Failed to fetch inserted author"))
    }

    async fn update(&self, author: &Author) -> CatalogResult<Author> {
        debug!("Updating author: {}", author.id);

        sqlx::query(
            r"
            UPDATE authors
            SET name = ?, email = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&author.name)
        .bind(&author.email)
        .bind(author.updated_at)
        .bind(author.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(author.id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Author", author.id))
    }

    async fn delete(&self, id: AuthorId) -> CatalogResult<bool> {
        debug!("Deleting author: {}", id);

        // Musics go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlAuthorRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAuthorRepository").finish_non_exhaustive()
    }
}
