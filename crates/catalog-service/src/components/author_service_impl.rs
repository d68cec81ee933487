//! Author service implementation.

use crate::author_service::AuthorService;
use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{AuthorRequest, AuthorResponse, AuthorWithMusicsResponse};
use async_trait::async_trait;
use catalog_core::{
    Author, AuthorId, AuthorWithMusicCount, CatalogError, CatalogResult, NewAuthor, Page, PageRequest,
    ValidateExt,
};
use catalog_config::CacheConfig;
use catalog_repository::AuthorRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Lifetime of a cached author-with-musics aggregate.
pub const DEFAULT_AUTHOR_MUSICS_TTL: Duration = Duration::from_secs(300);

/// Author service component for Shaku DI.
///
/// Author-with-musics reads go through the cache. Updates and deletes evict
/// the author's entry both before the write and after it. A failed eviction
/// before the write fails the request; one after the commit is only logged.
#[derive(Component)]
#[shaku(interface = AuthorService)]
pub struct AuthorServiceComponent {
    #[shaku(inject)]
    author_repository: Arc<dyn AuthorRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = cache_keys::DEFAULT_PREFIX.to_string())]
    key_prefix: String,
    #[shaku(default = DEFAULT_AUTHOR_MUSICS_TTL)]
    author_musics_ttl: Duration,
}

impl AuthorServiceComponent {
    /// Creates the service with the default key prefix and TTL.
    #[must_use]
    pub fn new(author_repository: Arc<dyn AuthorRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            author_repository,
            cache,
            key_prefix: cache_keys::DEFAULT_PREFIX.to_string(),
            author_musics_ttl: DEFAULT_AUTHOR_MUSICS_TTL,
        }
    }

    /// Overrides the cache key prefix and entry TTL.
    #[must_use]
    pub fn with_cache_settings(mut self, key_prefix: impl Into<String>, ttl: Duration) -> Self {
        self.key_prefix = key_prefix.into();
        self.author_musics_ttl = ttl;
        self
    }

    async fn evict(&self, id: AuthorId) -> CatalogResult<()> {
        let key = cache_keys::author_musics(&self.key_prefix, id);
        if self.cache.delete(&key).await? {
            debug!("Evicted cached musics of author {}", id);
        }
        Ok(())
    }

    /// Evicts after a committed write. The write already happened, so a
    /// failure here is logged and the request still succeeds.
    async fn evict_after_commit(&self, id: AuthorId) {
        if let Err(e) = self.evict(id).await {
            error!(author_id = %id, error = %e, "Failed to evict cached musics after write");
        }
    }

    async fn response_for(&self, author: Author) -> CatalogResult<AuthorResponse> {
        let music_count = self.author_repository.count_musics(author.id).await?;
        Ok(AuthorResponse::from(AuthorWithMusicCount {
            author,
            music_count,
        }))
    }
}

impl From<&CacheConfig> for AuthorServiceComponentParameters {
    fn from(config: &CacheConfig) -> Self {
        Self {
            key_prefix: config.key_prefix.clone(),
            author_musics_ttl: config.author_musics_ttl(),
        }
    }
}

#[async_trait]
impl AuthorService for AuthorServiceComponent {
    async fn create_author(&self, request: AuthorRequest) -> CatalogResult<AuthorResponse> {
        debug!("Creating author: {}", request.email);

        request.validate_request()?;

        if self.author_repository.exists_by_email(&request.email).await? {
            return Err(CatalogError::business_rule(format!(
                "Email already exists: {}",
                request.email
            )));
        }

        let saved = self.author_repository.save(&NewAuthor::from(request)).await?;

        info!("Author created: {}", saved.id);
        Ok(AuthorResponse::from(AuthorWithMusicCount {
            author: saved,
            music_count: 0,
        }))
    }

    async fn get_author(&self, id: AuthorId) -> CatalogResult<AuthorResponse> {
        debug!("Getting author: {}", id);

        let author = self
            .author_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Author", id))?;

        self.response_for(author).await
    }

    async fn get_author_with_musics(&self, id: AuthorId) -> CatalogResult<AuthorWithMusicsResponse> {
        debug!("Getting author with musics: {}", id);

        let cache_key = cache_keys::author_musics(&self.key_prefix, id);

        match self.cache.get::<AuthorWithMusicsResponse>(&cache_key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for author musics: {}", id);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(key = %cache_key, error = %e, "Cache read failed, loading from database"),
        }

        let aggregate = self
            .author_repository
            .find_with_musics(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Author", id))?;

        let response = AuthorWithMusicsResponse::from(aggregate);

        if let Err(e) = self
            .cache
            .set(&cache_key, &response, self.author_musics_ttl)
            .await
        {
            warn!(key = %cache_key, error = %e, "Failed to cache author musics");
        }

        Ok(response)
    }

    async fn list_authors(&self, page: PageRequest) -> CatalogResult<Page<AuthorResponse>> {
        debug!("Listing authors, page: {}, size: {}", page.page, page.size);

        let authors = self.author_repository.find_all(&page).await?;
        Ok(authors.map(AuthorResponse::from))
    }

    async fn update_author(&self, id: AuthorId, request: AuthorRequest) -> CatalogResult<AuthorResponse> {
        debug!("Updating author: {}", id);

        request.validate_request()?;

        let mut author = self
            .author_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Author", id))?;

        if !author.has_email(&request.email)
            && self.author_repository.exists_by_email(&request.email).await?
        {
            return Err(CatalogError::business_rule(format!(
                "Email already exists: {}",
                request.email
            )));
        }

        self.evict(id).await?;

        author.apply_update(request.name, request.email);
        let updated = self.author_repository.update(&author).await?;

        self.evict_after_commit(id).await;

        info!("Author updated: {}", id);
        self.response_for(updated).await
    }

    async fn delete_author(&self, id: AuthorId) -> CatalogResult<()> {
        debug!("Deleting author: {}", id);

        if !self.author_repository.exists_by_id(id).await? {
            return Err(CatalogError::not_found("Author", id));
        }

        self.evict(id).await?;

        if !self.author_repository.delete(id).await? {
            return Err(CatalogError::not_found("Author", id));
        }

        self.evict_after_commit(id).await;

        info!("Author deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for AuthorServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorServiceComponent")
            .field("key_prefix", &self.key_prefix)
            .field("author_musics_ttl", &self.author_musics_ttl)
            .finish_non_exhaustive()
    }
}
