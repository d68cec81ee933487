//! Music controller.

use crate::{
    extractors::{ApiQuery, PaginationQuery, ValidatedJson},
    responses::{created, no_content, ok, ok_with_message, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use catalog_core::{AuthorId, CatalogError, ErrorResponse, MusicId, MusicSearchCriteria, Page};
use catalog_service::{MusicRequest, MusicResponse};
use tracing::debug;

/// Base path of the music resource.
pub const MUSICS_PATH: &str = "/api/v1/musics";

/// Creates the music router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_musics).post(create_music))
        .route("/search", get(search_musics))
        .route("/author/:author_id", get(list_musics_by_author))
        .route("/:id", get(get_music).put(update_music).delete(delete_music))
}

/// Create a music.
#[utoipa::path(
    post,
    path = "/api/v1/musics",
    tag = "musics",
    request_body = MusicRequest,
    responses(
        (status = 201, description = "Music created", body = ApiResponse<MusicResponse>),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn create_music(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MusicRequest>,
) -> Result<Response, AppError> {
    debug!("Create music request: {}", request.name);

    let response = state.music_service.create_music(request).await?;
    let location = format!("{MUSICS_PATH}/{}", response.id);
    Ok(created(location, response, "Music created successfully"))
}

/// List musics.
#[utoipa::path(
    get,
    path = "/api/v1/musics",
    tag = "musics",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of musics", body = ApiResponse<Page<MusicResponse>>),
        (status = 400, description = "Unknown sort property", body = ErrorResponse)
    )
)]
pub async fn list_musics(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Page<MusicResponse>> {
    debug!("List musics request: {:?}", pagination);

    let page = state.music_service.list_musics(pagination.into()).await?;
    ok(page)
}

/// Search musics. Every criterion is optional; present ones must all match.
#[utoipa::path(
    get,
    path = "/api/v1/musics/search",
    tag = "musics",
    params(MusicSearchCriteria, PaginationQuery),
    responses(
        (status = 200, description = "Page of matching musics", body = ApiResponse<Page<MusicResponse>>),
        (status = 400, description = "Invalid criteria", body = ErrorResponse)
    )
)]
pub async fn search_musics(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<MusicSearchCriteria>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Page<MusicResponse>> {
    let page = state
        .music_service
        .search_musics(criteria, pagination.into())
        .await?;
    ok(page)
}

/// List the musics of one author.
#[utoipa::path(
    get,
    path = "/api/v1/musics/author/{author_id}",
    tag = "musics",
    params(("author_id" = i64, Path, description = "Author ID"), PaginationQuery),
    responses(
        (status = 200, description = "Page of the author's musics", body = ApiResponse<Page<MusicResponse>>),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn list_musics_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Page<MusicResponse>> {
    debug!("List musics by author request: {}", author_id);

    let author_id: AuthorId = parse_id(&author_id, "author")?;
    let page = state
        .music_service
        .list_musics_by_author(author_id, pagination.into())
        .await?;
    ok(page)
}

/// Get a music by ID.
#[utoipa::path(
    get,
    path = "/api/v1/musics/{id}",
    tag = "musics",
    params(("id" = i64, Path, description = "Music ID")),
    responses(
        (status = 200, description = "Music found", body = ApiResponse<MusicResponse>),
        (status = 404, description = "Music not found", body = ErrorResponse)
    )
)]
pub async fn get_music(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MusicResponse> {
    debug!("Get music request: {}", id);

    let music_id: MusicId = parse_id(&id, "music")?;
    let response = state.music_service.get_music(music_id).await?;
    ok(response)
}

/// Update a music.
#[utoipa::path(
    put,
    path = "/api/v1/musics/{id}",
    tag = "musics",
    params(("id" = i64, Path, description = "Music ID")),
    request_body = MusicRequest,
    responses(
        (status = 200, description = "Music updated", body = ApiResponse<MusicResponse>),
        (status = 400, description = "Invalid request or duplicate name", body = ErrorResponse),
        (status = 404, description = "Music or author not found", body = ErrorResponse)
    )
)]
pub async fn update_music(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<MusicRequest>,
) -> ApiResult<MusicResponse> {
    debug!("Update music request: {}", id);

    let music_id: MusicId = parse_id(&id, "music")?;
    let response = state.music_service.update_music(music_id, request).await?;
    ok_with_message(response, "Music updated successfully")
}

/// Delete a music.
#[utoipa::path(
    delete,
    path = "/api/v1/musics/{id}",
    tag = "musics",
    params(("id" = i64, Path, description = "Music ID")),
    responses(
        (status = 204, description = "Music deleted"),
        (status = 404, description = "Music not found", body = ErrorResponse)
    )
)]
pub async fn delete_music(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete music request: {}", id);

    let music_id: MusicId = parse_id(&id, "music")?;
    state.music_service.delete_music(music_id).await?;
    Ok(no_content())
}

/// Parses a typed ID from a path segment.
fn parse_id<T: std::str::FromStr>(raw: &str, kind: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError(CatalogError::validation(format!("Invalid {kind} ID: {raw}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id: MusicId = parse_id("7", "music").unwrap();
        assert_eq!(id, MusicId(7));
        assert!(parse_id::<MusicId>("7x", "music").is_err());
        assert!(parse_id::<AuthorId>("", "author").is_err());
    }
}
