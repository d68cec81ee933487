//! Author service trait definition.

use crate::dto::{AuthorRequest, AuthorResponse, AuthorWithMusicsResponse};
use async_trait::async_trait;
use catalog_core::{AuthorId, CatalogResult, Interface, Page, PageRequest};

/// Author service trait.
#[async_trait]
pub trait AuthorService: Interface + Send + Sync {
    /// Creates a new author. Emails are unique, ignoring case.
    async fn create_author(&self, request: AuthorRequest) -> CatalogResult<AuthorResponse>;

    /// Gets an author by ID.
    async fn get_author(&self, id: AuthorId) -> CatalogResult<AuthorResponse>;

    /// Gets an author with all of its musics, read through the cache.
    async fn get_author_with_musics(&self, id: AuthorId) -> CatalogResult<AuthorWithMusicsResponse>;

    /// Lists authors with pagination.
    async fn list_authors(&self, page: PageRequest) -> CatalogResult<Page<AuthorResponse>>;

    /// Updates an author's name and email.
    async fn update_author(&self, id: AuthorId, request: AuthorRequest) -> CatalogResult<AuthorResponse>;

    /// Deletes an author and every music it owns.
    async fn delete_author(&self, id: AuthorId) -> CatalogResult<()>;
}
