//! Unified error types for all layers of the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use thiserror::Error;

/// Message returned to clients for every unexpected failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Message returned to clients when request validation fails.
pub const VALIDATION_FAILED_MESSAGE: &str = "One or more fields have validation errors";

/// Unified error type for the music catalog.
///
/// Domain failures (`NotFound`, `Validation`, `BusinessRule`) are raised where
/// they are detected in the service layer and mapped to a response at the
/// HTTP boundary. Everything else is an unexpected failure.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Entity lookup found nothing
    #[error("{resource_type} not found with {field}: '{value}'")]
    NotFound {
        resource_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// Request failed field validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: Vec<FieldError>,
    },

    /// Business rule violation (duplicate email, duplicate music name, ...)
    #[error("{0}")]
    BusinessRule(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Cache store error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } | Self::BusinessRule(_) => 400,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns the reason phrase used in the `error` field of error bodies.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Not Found",
            Self::Validation { .. } => "Validation Failed",
            Self::BusinessRule(_) => "Bad Request",
            _ => "Internal Server Error",
        }
    }

    /// Returns true for failures that are not the caller's fault.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        self.status_code() >= 500
    }

    /// Creates a not found error for an entity looked up by id.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::not_found_by(resource_type, "id", id)
    }

    /// Creates a not found error for an entity looked up by an arbitrary field.
    #[must_use]
    pub fn not_found_by<T: ToString>(
        resource_type: &'static str,
        field: &'static str,
        value: T,
    ) -> Self {
        Self::NotFound {
            resource_type,
            field,
            value: value.to_string(),
        }
    }

    /// Creates a validation error without field detail.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Creates a validation error carrying per-field detail.
    #[must_use]
    pub fn invalid_fields(field_errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            field_errors,
        }
    }

    /// Creates a business rule violation.
    #[must_use]
    pub fn business_rule<T: Into<String>>(message: T) -> Self {
        Self::BusinessRule(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Message safe to show to clients. Unexpected failures are masked.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            e if e.is_unexpected() => GENERIC_ERROR_MESSAGE.to_string(),
            e => e.to_string(),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // MySQL 1062 / PostgreSQL 23505: unique constraint violation
            if let Some(code) = db_err.code() {
                if code == "1062" || code == "23505" {
                    return Self::BusinessRule(db_err.message().to_string());
                }
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    /// Reason phrase, e.g. `Not Found`
    pub error: String,
    pub message: String,
    /// Request path that produced the error
    pub path: String,
    /// Field name to message, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
    /// `"field: message"` strings, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Formats the error as `field: message`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{}: {}", self.field, self.message)
    }
}

impl ErrorResponse {
    /// Builds the error body for a failed request on `path`.
    #[must_use]
    pub fn from_error(error: &CatalogError, path: impl Into<String>) -> Self {
        let (field_errors, errors) = match error {
            CatalogError::Validation { field_errors, .. } if !field_errors.is_empty() => {
                // Later messages for the same field win.
                let map = field_errors
                    .iter()
                    .map(|e| (e.field.clone(), e.message.clone()))
                    .collect::<BTreeMap<_, _>>();
                let list = field_errors.iter().map(FieldError::formatted).collect();
                (Some(map), Some(list))
            }
            _ => (None, None),
        };

        Self {
            timestamp: Utc::now(),
            status: error.status_code(),
            error: error.reason().to_string(),
            message: error.client_message(),
            path: path.into(),
            field_errors,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::not_found("Author", 1).status_code(), 404);
        assert_eq!(CatalogError::validation("bad").status_code(), 400);
        assert_eq!(CatalogError::business_rule("dup").status_code(), 400);
        assert_eq!(CatalogError::Database("db".to_string()).status_code(), 500);
        assert_eq!(CatalogError::cache("down").status_code(), 500);
        assert_eq!(CatalogError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("Author", 42);
        assert_eq!(err.to_string(), "Author not found with id: '42'");
        assert_eq!(err.client_message(), "Author not found with id: '42'");
    }

    #[test]
    fn test_unexpected_errors_are_masked() {
        let err = CatalogError::Database("connection refused to 10.0.0.3".to_string());
        assert!(err.is_unexpected());
        assert_eq!(err.client_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_business_rule_message_passes_through() {
        let err = CatalogError::business_rule("Email already exists: a@b.com");
        assert_eq!(err.client_message(), "Email already exists: a@b.com");
        assert_eq!(err.reason(), "Bad Request");
    }

    #[test]
    fn test_error_response_for_not_found() {
        let body = ErrorResponse::from_error(&CatalogError::not_found("Music", 7), "/api/v1/musics/7");
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.path, "/api/v1/musics/7");
        assert!(body.field_errors.is_none());
        assert!(body.errors.is_none());
    }

    #[test]
    fn test_error_response_for_validation() {
        let err = CatalogError::invalid_fields(vec![
            FieldError::new("name", "Name is required", "not_blank"),
            FieldError::new("email", "Email must be valid", "email"),
        ]);
        let body = ErrorResponse::from_error(&err, "/api/v1/authors");

        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Validation Failed");
        assert_eq!(body.message, VALIDATION_FAILED_MESSAGE);
        let fields = body.field_errors.unwrap();
        assert_eq!(fields.get("name").unwrap(), "Name is required");
        assert_eq!(
            body.errors.unwrap(),
            vec!["name: Name is required", "email: Email must be valid"]
        );
    }

    #[test]
    fn test_error_response_serializes_camel_case() {
        let err = CatalogError::invalid_fields(vec![FieldError::new("name", "Name is required", "x")]);
        let json = serde_json::to_value(ErrorResponse::from_error(&err, "/p")).unwrap();
        assert!(json.get("fieldErrors").is_some());
        assert!(json.get("timestamp").is_some());

        let json = serde_json::to_value(ErrorResponse::from_error(&CatalogError::not_found("Author", 1), "/p")).unwrap();
        assert!(json.get("fieldErrors").is_none());
    }
}
