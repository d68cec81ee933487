//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{
    Author, AuthorId, AuthorWithMusicCount, AuthorWithMusics, CatalogResult, Interface, Music,
    MusicFilter, MusicId, MusicWithAuthor, NewAuthor, NewMusic, Page, PageRequest,
};

/// Author repository trait.
#[async_trait]
pub trait AuthorRepository: Interface + Send + Sync {
    /// Finds an author by ID.
    async fn find_by_id(&self, id: AuthorId) -> CatalogResult<Option<Author>>;

    /// Checks if an author exists.
    async fn exists_by_id(&self, id: AuthorId) -> CatalogResult<bool>;

    /// Checks if an email is taken, ignoring case.
    async fn exists_by_email(&self, email: &str) -> CatalogResult<bool>;

    /// Loads an author together with all of its musics.
    async fn find_with_musics(&self, id: AuthorId) -> CatalogResult<Option<AuthorWithMusics>>;

    /// Counts the musics owned by an author.
    async fn count_musics(&self, id: AuthorId) -> CatalogResult<u64>;

    /// Finds all authors with pagination.
    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<AuthorWithMusicCount>>;

    /// Inserts a new author.
    async fn save(&self, author: &NewAuthor) -> CatalogResult<Author>;

    /// Updates an existing author.
    async fn update(&self, author: &Author) -> CatalogResult<Author>;

    /// Deletes an author and, by cascade, its musics.
    async fn delete(&self, id: AuthorId) -> CatalogResult<bool>;
}

/// Music repository trait.
#[async_trait]
pub trait MusicRepository: Interface + Send + Sync {
    /// Finds a music by ID.
    async fn find_by_id(&self, id: MusicId) -> CatalogResult<Option<Music>>;

    /// Finds a music by ID together with its author's name.
    async fn find_with_author(&self, id: MusicId) -> CatalogResult<Option<MusicWithAuthor>>;

    /// Checks if an author already has a music with this name, optionally
    /// ignoring one music (the one being updated).
    async fn exists_by_name_and_author(
        &self,
        name: &str,
        author_id: AuthorId,
        excluding: Option<MusicId>,
    ) -> CatalogResult<bool>;

    /// Finds all musics with pagination.
    async fn find_all(&self, page: &PageRequest) -> CatalogResult<Page<MusicWithAuthor>>;

    /// Finds musics matching a filter with pagination.
    async fn search(
        &self,
        filter: &MusicFilter,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>>;

    /// Finds the musics of one author with pagination.
    async fn find_by_author(
        &self,
        author_id: AuthorId,
        page: &PageRequest,
    ) -> CatalogResult<Page<MusicWithAuthor>>;

    /// Inserts a new music.
    async fn save(&self, music: &NewMusic) -> CatalogResult<MusicWithAuthor>;

    /// Updates an existing music.
    async fn update(&self, music: &Music) -> CatalogResult<MusicWithAuthor>;

    /// Deletes a music by ID.
    async fn delete(&self, id: MusicId) -> CatalogResult<bool>;
}
