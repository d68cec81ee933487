//! MySQL music repository implementation.

use super::music_filter::push_where;
use super::rows::{inserted_id, MusicRow, MusicWithAuthorRow, MUSIC_WITH_AUTHOR_SELECT};
use crate::sort::{self, MUSIC_COLUMNS};
use crate::{traits::MusicRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{
    AuthorId, CatalogError, CatalogResult, Music, MusicFilter, MusicId, MusicWithAuthor, NewMusic,
    Page, PageRequest,
};
use chrono::Utc;
use shaku::Component;
use sqlx::{MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

/// MySQL music repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = MusicRepository)]
pub struct MySqlMusicRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlMusicRepository {
    /// Creates a new MySQL music repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MusicRepository for MySqlMusicRepository {
    async fn find_by_id(&self, id: MusicId) -> CatalogResult<Option<Music>> {
        debug!("Finding music by id: {}", id);

        let row = sqlx::query_as::<_, MusicRow>(
            r"
            SELECT m.id, m.name, m.duration_seconds, m.genre, m.author_id,
                   m.created_at, m.updated_at
            FROM musics m
            WHERE m.id = ?
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Music::from))
    }

    async fn find_with_author(&self, id: MusicId) -> CatalogResult<Option<MusicWithAuthor>> {
        debug!("Finding music with author by id: {}", id);

        let mut qb = QueryBuilder::<MySql>::new(MUSIC_WITH_AUTHOR_SELECT);
        qb.push(" WHERE m.id = ").push_bind(id.into_inner());

        let row = qb
            .build_query_as::<MusicWithAuthorRow>()
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(MusicWithAuthor::from))
    }

    async fn exists_by_name_and_author(
        &self,
        name: &str,
        author_id: AuthorId,
        excluding: Option<MusicId>,
    ) -> CatalogResult<bool> {
        let excluded = excluding.map(MusicId::into_inner);
        let result: Option<i64> = sqlx::query_scalar(
            r"
            SELECT 1 FROM musics
            WHERE name = ? AND author_id = ? AND (? IS NULL OR id <> ?)
            LIMIT 1
            ",
        )
        .bind(name)
        .bind(author_id.into_inner())
        .bind(excluded)
        .bind(excluded)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<MusicWithAuthor>> {
        self.search(&MusicFilter::unrestricted(), page).await
    }

    async fn search(
        &self,
        filter: &MusicFilter,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>> {
        debug!(
            "Searching musics with {:?}, page: {}, size: {}, sort: {}",
            filter.predicates(),
            page.page,
            page.size,
            page.sort
        );

        let order_by = sort::order_by(&page.sort, MUSIC_COLUMNS)?;
        let offset = page.offset()?;

        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM musics m");
        push_where(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::<MySql>::new(MUSIC_WITH_AUTHOR_SELECT);
        push_where(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<MusicWithAuthorRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let musics = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(musics, page.page, page.size, total.unsigned_abs()))
    }

    async fn find_by_author(
        &self,
        author_id: AuthorId,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>> {
        self.search(&MusicFilter::unrestricted().and_author(author_id), page)
            .await
    }

    async fn save(&self, music: &NewMusic) -> CatalogResult<MusicWithAuthor> {
        debug!("Saving new music: {} for author {}", music.name, music.author_id);

        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO musics (name, duration_seconds, genre, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&music.name)
        .bind(music.duration_seconds)
        .bind(&music.genre)
        .bind(music.author_id.into_inner())
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        // MySQL doesn't support RETURNING, so insert then select
        let id = MusicId(inserted_id(result.last_insert_id())?);
        self.find_with_author(id)
            .await?
            .ok_or_else(|| CatalogError::internal("Failed to fetch inserted music"))
    }

    async fn update(&self, music: &Music) -> CatalogResult<MusicWithAuthor> {
        debug!("Updating music: {}", music.id);

        sqlx::query(
            r"
            UPDATE musics
            SET name = ?, duration_seconds = ?, genre = ?, author_id = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&music.name)
        .bind(music.duration_seconds)
        .bind(&music.genre)
        .bind(music.author_id.into_inner())
        .bind(music.updated_at)
        .bind(music.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.find_with_author(music.id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Music", music.id))
    }

    async fn delete(&self, id: MusicId) -> CatalogResult<bool> {
        debug!("Deleting music: {}", id);

        let result = sqlx::query("DELETE FROM musics WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlMusicRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlMusicRepository").finish_non_exhaustive()
    }
}
