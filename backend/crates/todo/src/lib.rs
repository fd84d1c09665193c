//! Todo Backend Module
//!
//! Lists owned by users and the todo items inside them.
//!
//! - `domain/` - List and Todo entities, value objects, repository traits
//! - `application/` - `ListController`, `TodoController`
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! All routes require a session (see `auth::middleware::require_session`).
//! A list that belongs to another user is indistinguishable from a missing
//! one.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{ListController, ListInput, TodoController, TodoInput};
pub use error::{TodoError, TodoResult};
pub use infra::{InMemoryStore, InMemoryTodoRepository, PgTodoRepository};
pub use presentation::{TodoAppState, todo_router};

pub mod models {
    pub use crate::domain::entity::{list::List, todo::Todo, todo::TodoChanges};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
