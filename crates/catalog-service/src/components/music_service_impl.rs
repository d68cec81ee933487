//! Music service implementation.

use crate::dto::{MusicRequest, MusicResponse};
use crate::music_service::MusicService;
use async_trait::async_trait;
use catalog_core::{
    AuthorId, CatalogError, CatalogResult, MusicFilter, MusicId, MusicSearchCriteria, Page,
    PageRequest, ValidateExt,
};
use catalog_repository::{AuthorRepository, MusicRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

const DUPLICATE_MUSIC: &str = "Music with this name already exists for this author";

/// Music service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = MusicService)]
pub struct MusicServiceComponent {
    #[shaku(inject)]
    music_repository: Arc<dyn MusicRepository>,
    #[shaku(inject)]
    author_repository: Arc<dyn AuthorRepository>,
}

impl MusicServiceComponent {
    #[must_use]
    pub fn new(
        music_repository: Arc<dyn MusicRepository>,
        author_repository: Arc<dyn AuthorRepository>,
    ) -> Self {
        Self {
            music_repository,
            author_repository,
        }
    }

    async fn ensure_author_exists(&self, id: AuthorId) -> CatalogResult<()> {
        if self.author_repository.exists_by_id(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found("Author", id))
        }
    }
}

#[async_trait]
impl MusicService for MusicServiceComponent {
    async fn create_music(&self, request: MusicRequest) -> CatalogResult<MusicResponse> {
        debug!("Creating music: {}", request.name);

        request.validate_request()?;
        let music = request.into_new_music()?;

        self.ensure_author_exists(music.author_id).await?;

        if self
            .music_repository
            .exists_by_name_and_author(&music.name, music.author_id, None)
            .await?
        {
            return Err(CatalogError::business_rule(DUPLICATE_MUSIC));
        }

        let saved = self.music_repository.save(&music).await?;

        info!("Music created: {} for author {}", saved.music.id, saved.music.author_id);
        Ok(MusicResponse::from(saved))
    }

    async fn get_music(&self, id: MusicId) -> CatalogResult<MusicResponse> {
        debug!("Getting music: {}", id);

        self.music_repository
            .find_with_author(id)
            .await?
            .map(MusicResponse::from)
            .ok_or_else(|| CatalogError::not_found("Music", id))
    }

    async fn list_musics(&self, page: PageRequest) -> CatalogResult<Page<MusicResponse>> {
        debug!("Listing musics, page: {}, size: {}", page.page, page.size);

        let musics = self.music_repository.find_all(&page).await?;
        Ok(musics.map(MusicResponse::from))
    }

    async fn search_musics(
        &self,
        criteria: MusicSearchCriteria,
        page: PageRequest,
    ) -> CatalogResult<Page<MusicResponse>> {
        info!(?criteria, page = page.page, size = page.size, "Searching musics");

        let filter = MusicFilter::from_criteria(&criteria);
        let musics = self.music_repository.search(&filter, &page).await?;

        info!(total = musics.total_elements, "Music search finished");
        Ok(musics.map(MusicResponse::from))
    }

    async fn list_musics_by_author(
        &self,
        author_id: AuthorId,
        page: PageRequest,
    ) -> CatalogResult<Page<MusicResponse>> {
        debug!("Listing musics of author: {}", author_id);

        self.ensure_author_exists(author_id).await?;

        let musics = self.music_repository.find_by_author(author_id, &page).await?;
        Ok(musics.map(MusicResponse::from))
    }

    async fn update_music(&self, id: MusicId, request: MusicRequest) -> CatalogResult<MusicResponse> {
        debug!("Updating music: {}", id);

        request.validate_request()?;
        let details = request.into_new_music()?;

        let mut music = self
            .music_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Music", id))?;

        if details.author_id != music.author_id {
            self.ensure_author_exists(details.author_id).await?;
        }

        if self
            .music_repository
            .exists_by_name_and_author(&details.name, details.author_id, Some(id))
            .await?
        {
            return Err(CatalogError::business_rule(DUPLICATE_MUSIC));
        }

        music.apply_update(details);
        let updated = self.music_repository.update(&music).await?;

        info!("Music updated: {}", id);
        Ok(MusicResponse::from(updated))
    }

    async fn delete_music(&self, id: MusicId) -> CatalogResult<()> {
        debug!("Deleting music: {}", id);

        if !self.music_repository.delete(id).await? {
            return Err(CatalogError::not_found("Music", id));
        }

        info!("Music deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for MusicServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{NewAuthor, Sort};
    use catalog_repository::InMemoryCatalog;

    struct Fixture {
        service: MusicServiceComponent,
        john: AuthorId,
        paul: AuthorId,
    }

    async fn fixture() -> Fixture {
        let catalog = InMemoryCatalog::new();
        let authors = catalog.authors();
        let mut ids = Vec::new();
        for (name, email) in [("John Lennon", "john@lennon.com"), ("Paul McCartney", "paul@beatles.com")] {
            let author = authors
                .save(&NewAuthor {
                    name: name.to_string(),
                    email: email.to_string(),
                })
                .await
                .unwrap();
            ids.push(author.id);
        }

        Fixture {
            service: MusicServiceComponent::new(Arc::new(catalog.musics()), Arc::new(authors)),
            john: ids[0],
            paul: ids[1],
        }
    }

    fn request(name: &str, duration: i32, genre: Option<&str>, author: AuthorId) -> MusicRequest {
        MusicRequest {
            name: name.to_string(),
            duration_seconds: Some(duration),
            genre: genre.map(str::to_string),
            author_id: Some(author.into_inner()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_music() {
        let f = fixture().await;
        let created = f
            .service
            .create_music(request("Imagine", 183, Some("Rock"), f.john))
            .await
            .unwrap();

        assert_eq!(created.author.name, "John Lennon");

        let found = f.service.get_music(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_music_for_missing_author() {
        let f = fixture().await;
        let err = f
            .service
            .create_music(request("Imagine", 183, None, AuthorId(999)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Author not found with id: '999'");
    }

    #[tokio::test]
    async fn test_name_unique_per_author() {
        let f = fixture().await;
        f.service
            .create_music(request("Help", 140, None, f.john))
            .await
            .unwrap();
        f.service
            .create_music(request("Help", 140, None, f.paul))
            .await
            .unwrap();

        let err = f
            .service
            .create_music(request("Help", 140, None, f.john))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_MUSIC);
    }

    #[tokio::test]
    async fn test_create_music_invalid() {
        let f = fixture().await;
        let err = f
            .service
            .create_music(request("Imagine", 0, None, f.john))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_moves_music_to_other_author() {
        let f = fixture().await;
        let created = f
            .service
            .create_music(request("Yesterday", 125, None, f.john))
            .await
            .unwrap();

        let updated = f
            .service
            .update_music(created.id, request("Yesterday", 125, Some("Pop"), f.paul))
            .await
            .unwrap();

        assert_eq!(updated.author.id, f.paul);
        assert_eq!(updated.genre.as_deref(), Some("Pop"));

        let johns = f
            .service
            .list_musics_by_author(f.john, PageRequest::first())
            .await
            .unwrap();
        assert!(johns.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_allowed() {
        let f = fixture().await;
        let created = f
            .service
            .create_music(request("Imagine", 183, None, f.john))
            .await
            .unwrap();

        let updated = f
            .service
            .update_music(created.id, request("Imagine", 184, None, f.john))
            .await
            .unwrap();
        assert_eq!(updated.duration_seconds, 184);
    }

    #[tokio::test]
    async fn test_update_to_taken_name_fails() {
        let f = fixture().await;
        f.service
            .create_music(request("Imagine", 183, None, f.john))
            .await
            .unwrap();
        let other = f
            .service
            .create_music(request("Jealous Guy", 254, None, f.john))
            .await
            .unwrap();

        let err = f
            .service
            .update_music(other.id, request("Imagine", 254, None, f.john))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_update_missing_music_or_author() {
        let f = fixture().await;
        let err = f
            .service
            .update_music(MusicId(77), request("Imagine", 183, None, f.john))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Music not found with id: '77'");

        let created = f
            .service
            .create_music(request("Imagine", 183, None, f.john))
            .await
            .unwrap();
        let err = f
            .service
            .update_music(created.id, request("Imagine", 183, None, AuthorId(55)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Author not found with id: '55'");
    }

    #[tokio::test]
    async fn test_delete_music() {
        let f = fixture().await;
        let created = f
            .service
            .create_music(request("Imagine", 183, None, f.john))
            .await
            .unwrap();

        f.service.delete_music(created.id).await.unwrap();
        assert_eq!(f.service.get_music(created.id).await.unwrap_err().status_code(), 404);
        assert_eq!(f.service.delete_music(created.id).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_search_without_criteria_equals_listing() {
        let f = fixture().await;
        for (name, duration) in [("Imagine", 183), ("Mother", 334), ("Woman", 212)] {
            f.service
                .create_music(request(name, duration, None, f.john))
                .await
                .unwrap();
        }

        let page = PageRequest::new(0, 2).with_sort(Sort::desc("name"));
        let listed = f.service.list_musics(page.clone()).await.unwrap();
        let searched = f
            .service
            .search_musics(MusicSearchCriteria::default(), page)
            .await
            .unwrap();

        assert_eq!(listed, searched);
        assert_eq!(listed.total_elements, 3);
        assert_eq!(listed.content[0].name, "Woman");
    }

    #[tokio::test]
    async fn test_search_duration_range_inclusive() {
        let f = fixture().await;
        for (name, duration) in [("a", 59), ("b", 60), ("c", 200), ("d", 300), ("e", 301)] {
            f.service
                .create_music(request(name, duration, None, f.john))
                .await
                .unwrap();
        }

        let criteria = MusicSearchCriteria {
            min_duration: Some(60),
            max_duration: Some(300),
            ..Default::default()
        };
        let found = f
            .service
            .search_musics(criteria, PageRequest::first())
            .await
            .unwrap();

        let names: Vec<_> = found.content.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_search_combines_criteria() {
        let f = fixture().await;
        f.service
            .create_music(request("Imagine", 183, Some("Rock"), f.john))
            .await
            .unwrap();
        f.service
            .create_music(request("Let It Be", 243, Some("rock"), f.paul))
            .await
            .unwrap();
        f.service
            .create_music(request("Blackbird", 138, Some("Folk"), f.paul))
            .await
            .unwrap();

        let criteria = MusicSearchCriteria {
            genre: Some("ROCK".to_string()),
            author_id: Some(f.paul.into_inner()),
            ..Default::default()
        };
        let found = f
            .service
            .search_musics(criteria, PageRequest::first())
            .await
            .unwrap();

        assert_eq!(found.total_elements, 1);
        assert_eq!(found.content[0].name, "Let It Be");
    }

    #[tokio::test]
    async fn test_list_by_missing_author() {
        let f = fixture().await;
        let err = f
            .service
            .list_musics_by_author(AuthorId(404), PageRequest::first())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
