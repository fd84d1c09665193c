//! Todo Error Types
//!
//! List/todo error variants that integrate with `kernel::error::AppError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validate::ValidationError;
use thiserror::Error;

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Missing list, or one owned by someone else
    #[error("No such list")]
    NoSuchList,

    /// Missing todo, or one in another list
    #[error("No such todo")]
    NoSuchTodo,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unique constraint violation reported by the store
    #[error("Duplicate record")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::NoSuchList | TodoError::NoSuchTodo | TodoError::Validation(_) => {
                ErrorKind::BadRequest
            }
            TodoError::Duplicate => ErrorKind::Conflict,
            TodoError::Database(_) | TodoError::Internal(_) => ErrorKind::ServerError,
        }
    }
}

impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => TodoError::Duplicate,
            _ => TodoError::Database(err),
        }
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        let app_err = AppError::new(err.kind(), err.to_string());
        match err {
            TodoError::Database(source) => app_err.with_source(source),
            _ => app_err,
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
