//! Request Validation Rules
//!
//! Shallow, per-field checks shared by every controller. Types are
//! enforced by the request DTOs; these rules cover presence and blankness.

use thiserror::Error;

use crate::error::app_error::AppError;

/// Maximum length (in characters) of any free-text field
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Payload validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent
    #[error("Missing field: {0}")]
    Missing(&'static str),

    /// A text field is empty or whitespace only
    #[error("Field must not be blank: {0}")]
    Blank(&'static str),

    /// A text field exceeds [`MAX_TEXT_LENGTH`]
    #[error("Field {field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// An update payload carries none of the updatable fields
    #[error("Nothing to update: expected one of {}", .0.join(", "))]
    NothingToUpdate(&'static [&'static str]),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// Require a field to be present
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing(field))
}

/// Require a non-blank text field. Surrounding whitespace is trimmed.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    check_text(field, value)
}

/// Validate a text field only when it is present
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    value.map(|v| check_text(field, v)).transpose()
}

/// Require at least one of the updatable fields to be present
pub fn any_present(fields: &'static [&'static str], present: &[bool]) -> Result<(), ValidationError> {
    if present.iter().any(|&p| p) {
        Ok(())
    } else {
        Err(ValidationError::NothingToUpdate(fields))
    }
}

fn check_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}
