//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validate::ValidationError;
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user is registered under the given email
    #[error("No such user")]
    UserNotFound,

    /// Stored credential does not match
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Registration with an email already on file
    #[error("Email already registered")]
    EmailTaken,

    /// Unique constraint violation reported by the store
    #[error("Duplicate record")]
    Duplicate,

    #[error("{0}")]
    InvalidEmail(&'static str),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound | AuthError::IncorrectPassword => ErrorKind::Unauthorized,
            AuthError::EmailTaken | AuthError::Duplicate => ErrorKind::Conflict,
            AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_)
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::ServerError,
        }
    }

    fn action(&self) -> Option<&'static str> {
        match self {
            AuthError::EmailTaken => Some("Please sign in or use a different email"),
            AuthError::InvalidEmail(_) => Some("Please enter a valid email address"),
            AuthError::InvalidPassword(PasswordPolicyError::TooLong { .. }) => {
                Some("Please choose a shorter password")
            }
            AuthError::InvalidPassword(PasswordPolicyError::EmptyOrWhitespace) => {
                Some("Please enter a password")
            }
            AuthError::InvalidPassword(PasswordPolicyError::InvalidCharacter) => {
                Some("Please remove any special control characters")
            }
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::Duplicate,
            _ => AuthError::Database(err),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let app_err = AppError::new(err.kind(), err.to_string());
        let app_err = match err.action() {
            Some(action) => app_err.with_action(action),
            None => app_err,
        };

        match err {
            AuthError::Database(source) => app_err.with_source(source),
            _ => app_err,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::IncorrectPassword.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::Duplicate.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::Validation(ValidationError::Missing("email")).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::ServerError
        );
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = AuthError::UserNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "No such user");

        let err: AppError = AuthError::EmailTaken.into();
        assert_eq!(err.status_code(), 409);
        assert!(err.action().is_some());
    }

    #[test]
    fn test_row_not_found_is_not_duplicate() {
        let err = AuthError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Database(_)));
    }
}
