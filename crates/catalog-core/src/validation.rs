//! Validation utilities.

use crate::{CatalogError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CatalogError` on failure.
    fn validate_request(&self) -> Result<(), CatalogError> {
        self.validate().map_err(validation_errors_to_catalog_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, ordered by field
/// name. Field names are reported in camelCase, as they appear in JSON bodies.
#[must_use]
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| (camel_case(&field), errors))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                FieldError::new(
                    field.clone(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                    error.code.to_string(),
                )
            })
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts `validator::ValidationErrors` to `CatalogError`.
#[must_use]
pub fn validation_errors_to_catalog_error(errors: ValidationErrors) -> CatalogError {
    CatalogError::invalid_fields(collect_field_errors(&errors))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        name: String,
        #[validate(email(message = "Email must be valid"))]
        email: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_validate_request_collects_field_errors() {
        let probe = Probe {
            name: "  ".to_string(),
            email: "nope".to_string(),
        };
        let err = probe.validate_request().unwrap_err();
        match err {
            CatalogError::Validation { field_errors, .. } => {
                assert_eq!(field_errors.len(), 2);
                assert_eq!(field_errors[0].field, "email");
                assert_eq!(field_errors[0].message, "Email must be valid");
                assert_eq!(field_errors[1].field, "name");
                assert_eq!(field_errors[1].message, "Name is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("duration_seconds"), "durationSeconds");
        assert_eq!(camel_case("authorId"), "authorId");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_validate_request_passes() {
        let probe = Probe {
            name: "Ok".to_string(),
            email: "ok@example.com".to_string(),
        };
        assert!(probe.validate_request().is_ok());
    }
}
