//! Author controller.

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
use catalog_core::{AuthorId, CatalogError, ErrorResponse, Page};
use catalog_service::{AuthorRequest, AuthorResponse, AuthorWithMusicsResponse};
use tracing::debug;

/// Base path of the author resource.
pub const AUTHORS_PATH: &str = "/api/v1/authors";

/// Creates the author router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/:id", get(get_author).put(update_author).delete(delete_author))
        .route("/:id/musics", get(get_author_with_musics))
}

/// Create an author.
#[utoipa::path(
    post,
    path = "/api/v1/authors",
    tag = "authors",
    request_body = AuthorRequest,
    responses(
        (status = 201, description = "Author created", body = ApiResponse<AuthorResponse>),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthorRequest>,
) -> Result<Response, AppError> {
    debug!("Create author request: {}", request.email);

    let response = state.author_service.create_author(request).await?;
    let location = format!("{AUTHORS_PATH}/{}", response.id);
    Ok(created(location, response, "Author created successfully"))
}

/// List authors.
#[utoipa::path(
    get,
    path = "/api/v1/authors",
    tag = "authors",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of authors", body = ApiResponse<Page<AuthorResponse>>),
        (status = 400, description = "Unknown sort property", body = ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<Page<AuthorResponse>> {
    debug!("List authors request: {:?}", pagination);

    let page = state.author_service.list_authors(pagination.into()).await?;
    ok(page)
}

/// Get an author by ID.
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author found", body = ApiResponse<AuthorResponse>),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AuthorResponse> {
    debug!("Get author request: {}", id);

    let author_id = parse_author_id(&id)?;
    let response = state.author_service.get_author(author_id).await?;
    ok(response)
}

/// Get an author together with its musics.
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}/musics",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author with musics", body = ApiResponse<AuthorWithMusicsResponse>),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author_with_musics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AuthorWithMusicsResponse> {
    debug!("Get author with musics request: {}", id);

    let author_id = parse_author_id(&id)?;
    let response = state.author_service.get_author_with_musics(author_id).await?;
    ok(response)
}

/// Update an author.
#[utoipa::path(
    put,
    path = "/api/v1/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    request_body = AuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = ApiResponse<AuthorResponse>),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AuthorRequest>,
) -> ApiResult<AuthorResponse> {
    debug!("Update author request: {}", id);

    let author_id = parse_author_id(&id)?;
    let response = state.author_service.update_author(author_id, request).await?;
    ok_with_message(response, "Author updated successfully")
}

/// Delete an author and its musics.
#[utoipa::path(
    delete,
    path = "/api/v1/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete author request: {}", id);

    let author_id = parse_author_id(&id)?;
    state.author_service.delete_author(author_id).await?;
    Ok(no_content())
}

/// Parses an author ID from a path segment.
fn parse_author_id(id: &str) -> Result<AuthorId, AppError> {
    id.parse()
        .map_err(|_| AppError(CatalogError::validation(format!("Invalid author ID: {id}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_author_id() {
        assert_eq!(parse_author_id("42").unwrap(), AuthorId(42));
        let err = parse_author_id("abc").unwrap_err();
        assert_eq!(err.0.status_code(), 400);
    }
}
