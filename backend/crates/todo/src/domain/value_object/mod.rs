//! Value Object Module

pub mod list_title;
pub mod todo_text;

pub use list_title::ListTitle;
pub use todo_text::TodoText;
