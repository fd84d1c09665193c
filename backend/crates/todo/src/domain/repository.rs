//! Repository Traits

use auth::models::Email;
use kernel::id::{ListId, TodoId};

use crate::domain::entity::{list::List, todo::Todo};
use crate::error::TodoResult;

/// List repository trait
#[trait_variant::make(ListRepository: Send)]
pub trait LocalListRepository {
    async fn create_list(&self, list: &List) -> TodoResult<()>;

    async fn find_list(&self, id: ListId) -> TodoResult<Option<List>>;

    /// Lists of one owner, oldest first
    async fn lists_by_owner(&self, owner: &Email) -> TodoResult<Vec<List>>;

    async fn update_list(&self, list: &List) -> TodoResult<()>;

    /// Delete a list and its todos. Returns whether a list was removed.
    async fn delete_list(&self, id: ListId) -> TodoResult<bool>;
}

/// Todo repository trait
#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    async fn create_todo(&self, todo: &Todo) -> TodoResult<()>;

    async fn find_todo(&self, id: TodoId) -> TodoResult<Option<Todo>>;

    /// Todos of one list (removed ones included), oldest first
    async fn todos_by_list(&self, list_id: ListId) -> TodoResult<Vec<Todo>>;

    async fn update_todo(&self, todo: &Todo) -> TodoResult<()>;

    async fn delete_todo(&self, id: TodoId) -> TodoResult<bool>;
}
