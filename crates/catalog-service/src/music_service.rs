//! Music service trait definition.

use crate::dto::{MusicRequest, MusicResponse};
use async_trait::async_trait;
use catalog_core::{AuthorId, CatalogResult, Interface, MusicId, MusicSearchCriteria, Page, PageRequest};

/// Music service trait.
#[async_trait]
pub trait MusicService: Interface + Send + Sync {
    /// Creates a new music for an existing author.
    async fn create_music(&self, request: MusicRequest) -> CatalogResult<MusicResponse>;

    /// Gets a music by ID, with its author.
    async fn get_music(&self, id: MusicId) -> CatalogResult<MusicResponse>;

    /// Lists musics with pagination.
    async fn list_musics(&self, page: PageRequest) -> CatalogResult<Page<MusicResponse>>;

    /// Searches musics; every criterion is optional and present ones are ANDed.
    async fn search_musics(
        &self,
        criteria: MusicSearchCriteria,
        page: PageRequest,
    ) -> CatalogResult<Page<MusicResponse>>;

    /// Lists the musics of one author.
    async fn list_musics_by_author(
        &self,
        author_id: AuthorId,
        page: PageRequest,
    ) -> CatalogResult<Page<MusicResponse>>;

    /// Updates a music, possibly moving it to another author.
    async fn update_music(&self, id: MusicId, request: MusicRequest) -> CatalogResult<MusicResponse>;

    /// Deletes a music.
    async fn delete_music(&self, id: MusicId) -> CatalogResult<()>;
}
