//! Query string extractor with the standard error body.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use catalog_core::CatalogError;
use serde::de::DeserializeOwned;

/// Like `axum::extract::Query`, but rejects with [`AppError`] so bad query
/// strings get the same error body as every other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError(CatalogError::validation(format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                )))
            })?;
        Ok(ApiQuery(value))
    }
}
