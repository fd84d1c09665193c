//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryStore, InMemoryTodoRepository};
pub use postgres::PgTodoRepository;
