//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the JSON body and validates it with the
//! `validator` crate. Both malformed bodies and validation failures are
//! rejected with the standard error body and status 400; validation failures
//! carry per-field messages.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use catalog_core::{validation_errors_to_catalog_error, CatalogError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// async fn create_author(ValidatedJson(request): ValidatedJson<AuthorRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn malformed_body(rejection: &JsonRejection) -> CatalogError {
    CatalogError::validation(format!("Malformed request body: {}", rejection.body_text()))
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(malformed_body(&rejection)))?;

        value
            .validate()
            .map_err(|errors| AppError(validation_errors_to_catalog_error(errors)))?;

        Ok(ValidatedJson(value))
    }
}
