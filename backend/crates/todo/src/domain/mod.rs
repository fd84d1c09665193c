//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{list::List, todo::Todo, todo::TodoChanges};
pub use repository::{ListRepository, TodoRepository};
