//! Todo Controller
//!
//! Todos are always addressed through their (already resolved) list.

use std::sync::Arc;

use kernel::id::TodoId;
use kernel::validate::any_present;

use crate::domain::entity::list::List;
use crate::domain::entity::todo::{Todo, TodoChanges};
use crate::domain::repository::TodoRepository;
use crate::domain::value_object::todo_text::TodoText;
use crate::error::{TodoError, TodoResult};

const UPDATABLE_FIELDS: &[&str] = &["text", "done", "removed"];

/// Submitted todo fields; which ones are required depends on the operation
#[derive(Debug, Clone, Default)]
pub struct TodoInput {
    pub text: Option<String>,
    pub done: Option<bool>,
    pub removed: Option<bool>,
}

impl TodoInput {
    fn into_changes(self) -> TodoResult<TodoChanges> {
        any_present(
            UPDATABLE_FIELDS,
            &[self.text.is_some(), self.done.is_some(), self.removed.is_some()],
        )?;

        Ok(TodoChanges {
            text: TodoText::parse_optional(self.text)?,
            done: self.done,
            removed: self.removed,
        })
    }
}

pub struct TodoController<T>
where
    T: TodoRepository,
{
    repo: Arc<T>,
}

impl<T> TodoController<T>
where
    T: TodoRepository,
{
    pub fn new(repo: Arc<T>) -> Self {
        Self { repo }
    }

    pub async fn get_list_todo(&self, list: &List, id: TodoId) -> TodoResult<Todo> {
        match self.repo.find_todo(id).await? {
            Some(todo) if todo.list_id == list.id => Ok(todo),
            _ => Err(TodoError::NoSuchTodo),
        }
    }

    /// New todos start neither done nor removed
    pub async fn create_todo_in_list(&self, list: &List, input: TodoInput) -> TodoResult<Todo> {
        let todo = Todo::new(list.id, TodoText::parse(input.text)?);

        self.repo.create_todo(&todo).await?;
        tracing::info!(todo_id = %todo.id, list_id = %list.id, "Todo created");

        Ok(todo)
    }

    pub async fn update_todo(&self, mut todo: Todo, input: TodoInput) -> TodoResult<Todo> {
        todo.apply(input.into_changes()?);
        self.repo.update_todo(&todo).await?;
        Ok(todo)
    }

    pub async fn delete_todo(&self, todo: Todo) -> TodoResult<Todo> {
        if !self.repo.delete_todo(todo.id).await? {
            return Err(TodoError::NoSuchTodo);
        }
        tracing::info!(todo_id = %todo.id, "Todo deleted");
        Ok(todo)
    }
}
