//! Application Layer
//!
//! Controllers wrapping the list and todo repositories.

pub mod list_controller;
pub mod todo_controller;

pub use list_controller::{ListController, ListInput};
pub use todo_controller::{TodoController, TodoInput};
