//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use catalog_core::{AuthorId, ErrorResponse, MusicId};
use catalog_service::{
    AuthorRequest, AuthorResponse, AuthorSummary, AuthorWithMusicsResponse, MusicRequest,
    MusicResponse, MusicSummary,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the music catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Music Catalog API",
        version = "1.0.0",
        description = "Authors and their musics, with search and a cached author aggregate",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Author endpoints
        crate::controllers::author_controller::create_author,
        crate::controllers::author_controller::list_authors,
        crate::controllers::author_controller::get_author,
        crate::controllers::author_controller::get_author_with_musics,
        crate::controllers::author_controller::update_author,
        crate::controllers::author_controller::delete_author,
        // Music endpoints
        crate::controllers::music_controller::create_music,
        crate::controllers::music_controller::list_musics,
        crate::controllers::music_controller::search_musics,
        crate::controllers::music_controller::list_musics_by_author,
        crate::controllers::music_controller::get_music,
        crate::controllers::music_controller::update_music,
        crate::controllers::music_controller::delete_music,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::liveness_check,
        crate::controllers::health_controller::readiness_check,
    ),
    components(
        schemas(
            AuthorId,
            MusicId,
            ErrorResponse,
            AuthorRequest,
            AuthorResponse,
            AuthorWithMusicsResponse,
            MusicSummary,
            MusicRequest,
            MusicResponse,
            AuthorSummary,
            HealthResponse,
        )
    ),
    tags(
        (name = "authors", description = "Author management"),
        (name = "musics", description = "Music management and search"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/api/v1/authors",
            "/api/v1/authors/{id}",
            "/api/v1/authors/{id}/musics",
            "/api/v1/musics",
            "/api/v1/musics/search",
            "/api/v1/musics/author/{author_id}",
            "/api/v1/musics/{id}",
            "/health/ready",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
