//! API response types.

use crate::middleware::current_request_path;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{CatalogError, ErrorResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Message attached to plain successful responses.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with the default message.
    pub fn success(data: T) -> Self {
        Self::with_message(data, SUCCESS_MESSAGE)
    }

    /// Creates a successful response with a specific message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let path = current_request_path();

        if self.0.is_unexpected() {
            error!(path = %path, error = %self.0, "Unexpected error while handling request");
        }

        let body = ErrorResponse::from_error(&self.0, path);
        (status, Json(body)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a success response with a specific message.
pub fn ok_with_message<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(Json(ApiResponse::with_message(data, message)))
}

/// Helper to create a created (201) response pointing at the new resource.
pub fn created<T: Serialize>(location: String, data: T, message: &str) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::with_message(data, message)),
    )
        .into_response()
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
