//! List Controller
//!
//! Validates list payloads and scopes every lookup to the session user.

use std::sync::Arc;

use auth::models::Email;
use kernel::id::ListId;

use crate::domain::entity::{list::List, todo::Todo};
use crate::domain::repository::{ListRepository, TodoRepository};
use crate::domain::value_object::list_title::ListTitle;
use crate::error::{TodoError, TodoResult};

/// Submitted list fields
#[derive(Debug, Clone, Default)]
pub struct ListInput {
    pub title: Option<String>,
}

pub struct ListController<T>
where
    T: ListRepository + TodoRepository,
{
    repo: Arc<T>,
}

impl<T> ListController<T>
where
    T: ListRepository + TodoRepository,
{
    pub fn new(repo: Arc<T>) -> Self {
        Self { repo }
    }

    /// Resolve a list the owner may access
    ///
    /// A foreign list is reported exactly like a missing one.
    pub async fn get_owned_list(&self, owner: &Email, id: ListId) -> TodoResult<List> {
        match self.repo.find_list(id).await? {
            Some(list) if list.is_owned_by(owner) => Ok(list),
            _ => Err(TodoError::NoSuchList),
        }
    }

    pub async fn lists_of(&self, owner: &Email) -> TodoResult<Vec<List>> {
        self.repo.lists_by_owner(owner).await
    }

    pub async fn create_list(&self, owner: &Email, input: ListInput) -> TodoResult<List> {
        let title = ListTitle::parse(input.title)?;
        let list = List::new(owner.clone(), title);

        self.repo.create_list(&list).await?;
        tracing::info!(list_id = %list.id, owner = %list.owner, "List created");

        Ok(list)
    }

    pub async fn update_list(&self, mut list: List, input: ListInput) -> TodoResult<List> {
        list.rename(ListTitle::parse(input.title)?);
        self.repo.update_list(&list).await?;
        Ok(list)
    }

    /// Delete a list with its todos and return it
    pub async fn delete_list(&self, list: List) -> TodoResult<List> {
        if !self.repo.delete_list(list.id).await? {
            return Err(TodoError::NoSuchList);
        }
        tracing::info!(list_id = %list.id, "List deleted");
        Ok(list)
    }

    pub async fn get_lists_todos(&self, list: &List) -> TodoResult<Vec<Todo>> {
        self.repo.todos_by_list(list.id).await
    }
}
